//! Content loader - reads a collection directory into content items
//!
//! A directory is read one level deep, in file-name order. A missing
//! directory is not an error: it logs a warning and yields nothing. A file
//! that cannot be read or whose front-matter does not parse is skipped with a
//! warning, so one bad file never hides the rest of the collection. Only a
//! failure to list the directory itself is returned to the caller.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentItem, FrontMatter};
use crate::error::ContentError;

/// A parsed content file before it is shaped for a particular view
#[derive(Debug, Clone)]
pub struct Document {
    pub slug: String,
    pub front_matter: FrontMatter,
    pub body: String,
    pub loaded_at: DateTime<Utc>,
}

impl Document {
    /// Shape into a content item, filling metadata defaults
    pub fn into_item(self) -> ContentItem {
        let metadata = self.front_matter.into_metadata(self.loaded_at);
        ContentItem {
            slug: self.slug,
            metadata,
            content: self.body,
            loaded_at: Some(self.loaded_at),
        }
    }
}

/// Loads content files from a directory
#[derive(Debug, Clone)]
pub struct ContentLoader {
    extensions: &'static [&'static str],
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentLoader {
    /// Loader for `.mdx` collections (work and blog)
    pub fn new() -> Self {
        Self {
            extensions: &["mdx"],
        }
    }

    /// Loader accepting the given extensions (without the dot)
    pub fn with_extensions(extensions: &'static [&'static str]) -> Self {
        Self { extensions }
    }

    /// Load every content item in `dir`, in listing order
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<ContentItem>, ContentError> {
        Ok(self
            .load_documents(dir)?
            .into_iter()
            .map(Document::into_item)
            .collect())
    }

    /// Load every content file in `dir` as a raw document
    pub fn load_documents(&self, dir: &Path) -> Result<Vec<Document>, ContentError> {
        if !dir.is_dir() {
            tracing::warn!("{}", ContentError::DirectoryNotFound(dir.to_path_buf()));
            return Ok(Vec::new());
        }

        let loaded_at = Utc::now();
        let mut documents = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ContentError::io(dir, e.into()));
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !self.accepts(path) {
                continue;
            }

            match self.load_document(path, loaded_at) {
                Ok(document) => documents.push(document),
                Err(e) => tracing::warn!("Skipping content file: {}", e),
            }
        }

        tracing::debug!("Loaded {} documents from {:?}", documents.len(), dir);
        Ok(documents)
    }

    /// Look up a single item by slug.
    ///
    /// Returns `None` when no file matches, when the file cannot be read or
    /// parsed, or when the slug could escape the directory.
    pub fn find(&self, dir: &Path, slug: &str) -> Result<Option<Document>, ContentError> {
        if !is_safe_slug(slug) {
            tracing::debug!("Rejected slug {:?}", slug);
            return Ok(None);
        }

        let loaded_at = Utc::now();
        for ext in self.extensions {
            let path = dir.join(format!("{}.{}", slug, ext));
            if !path.is_file() {
                continue;
            }
            return match self.load_document(&path, loaded_at) {
                Ok(document) => Ok(Some(document)),
                Err(e) => {
                    tracing::warn!("Skipping content file: {}", e);
                    Ok(None)
                }
            };
        }

        Ok(None)
    }

    /// Read and parse a single file
    pub fn load_document(
        &self,
        path: &Path,
        loaded_at: DateTime<Utc>,
    ) -> Result<Document, ContentError> {
        let raw = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let (front_matter, body) =
            FrontMatter::parse(&raw).map_err(|e| ContentError::Parse {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Document {
            slug,
            front_matter,
            body: body.to_string(),
            loaded_at,
        })
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e))
            .unwrap_or(false)
    }
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && !slug.contains("..")
        && !slug.contains(['/', '\\', '\0'])
}
