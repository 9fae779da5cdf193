//! portfolio-rs: content backend for a personal portfolio site
//!
//! Reads work and blog collections from front-matter files, merges them with
//! public repositories from the code-hosting API, and serves the result as a
//! JSON API alongside the site's static assets.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod helpers;
pub mod merge;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use aggregate::PostRange;
use content::service::{self, Service, ServiceSummary};
use content::{Collection, ContentItem, ContentLoader};
use error::ContentError;
use github::RepoFetcher;
use merge::MergedProject;

/// The portfolio site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Static assets served as-is
    pub public_dir: PathBuf,
}

impl Portfolio {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Use an already-loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.content.public_dir);
        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        collection.dir(&self.base_dir, &self.config.content)
    }

    pub fn services_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.content.services_dir)
    }

    /// Every item in a collection, newest first
    pub fn posts(&self, collection: Collection) -> Result<Vec<ContentItem>, ContentError> {
        let items = ContentLoader::new().load_dir(&self.collection_dir(collection))?;
        Ok(aggregate::newest_first(items))
    }

    /// One item from a collection by slug
    pub fn post(
        &self,
        collection: Collection,
        slug: &str,
    ) -> Result<Option<ContentItem>, ContentError> {
        Ok(ContentLoader::new()
            .find(&self.collection_dir(collection), slug)?
            .map(|doc| doc.into_item()))
    }

    /// Local work merged with showcase repositories, newest first.
    ///
    /// Repositories are skipped when the `github` section is switched off
    /// or `fetcher` is `None`.
    pub async fn projects(
        &self,
        fetcher: Option<&RepoFetcher>,
        range: Option<PostRange>,
    ) -> Result<Vec<MergedProject>, ContentError> {
        let local = ContentLoader::new().load_dir(&self.collection_dir(Collection::Work))?;

        let github = &self.config.github;
        let remote = match fetcher {
            Some(fetcher) if github.display => fetcher.fetch_repos(&github.username).await,
            _ => Vec::new(),
        };

        let merged = merge::merge_projects(local, remote, &github.placeholder_image);
        Ok(match range {
            Some(range) => aggregate::slice_range(merged, range),
            None => merged,
        })
    }

    pub fn services(&self) -> Result<Vec<ServiceSummary>, ContentError> {
        service::load_services(&self.services_dir())
    }

    pub fn service(&self, slug: &str) -> Result<Option<Service>, ContentError> {
        service::load_service(&self.services_dir(), slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let work = tmp.path().join("content/work");
        fs::create_dir_all(&work).unwrap();
        fs::write(
            work.join("older.mdx"),
            "---\ntitle: Older\npublishedAt: 2023-01-01\n---\n",
        )
        .unwrap();
        fs::write(
            work.join("newer.mdx"),
            "---\ntitle: Newer\npublishedAt: 2024-01-01\n---\n",
        )
        .unwrap();
        tmp
    }

    #[test]
    fn test_new_without_config() {
        let tmp = TempDir::new().unwrap();
        let portfolio = Portfolio::new(tmp.path()).unwrap();
        assert_eq!(portfolio.public_dir, tmp.path().join("public"));
    }

    #[test]
    fn test_new_reads_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("_config.yml"),
            "content:\n  blog_dir: writing\ngithub:\n  username: someone\n",
        )
        .unwrap();
        let portfolio = Portfolio::new(tmp.path()).unwrap();
        assert_eq!(
            portfolio.collection_dir(Collection::Blog),
            tmp.path().join("writing")
        );
        assert_eq!(portfolio.config.github.username, "someone");
    }

    #[test]
    fn test_posts_sorted() {
        let tmp = site();
        let portfolio = Portfolio::new(tmp.path()).unwrap();
        let posts = portfolio.posts(Collection::Work).unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);
        assert!(portfolio.posts(Collection::Blog).unwrap().is_empty());
    }

    #[test]
    fn test_post_by_slug() {
        let tmp = site();
        let portfolio = Portfolio::new(tmp.path()).unwrap();
        let post = portfolio.post(Collection::Work, "older").unwrap().unwrap();
        assert_eq!(post.metadata.title, "Older");
        assert!(portfolio.post(Collection::Work, "nope").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_projects_without_fetcher() {
        let tmp = site();
        let portfolio = Portfolio::new(tmp.path()).unwrap();
        let projects = portfolio
            .projects(None, Some(PostRange::first(1)))
            .await
            .unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].slug, "newer");
    }
}
