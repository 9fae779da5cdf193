//! Repository showcase: filtering, ordering and summary figures for the
//! work page

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use super::repository::RemoteRepository;
use crate::helpers::encode_component;

/// How far back "recent" reaches
const RECENT_DAYS: i64 = 30;

const DEFAULT_COLOR: &str = "#8B5CF6";

/// Which repositories to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoFilter {
    #[default]
    All,
    /// At least one star
    Featured,
    /// Updated within the last 30 days
    Recent,
}

/// How to order repositories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoSort {
    #[default]
    Updated,
    Stars,
    Forks,
    Name,
}

impl std::str::FromStr for RepoFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RepoFilter::All),
            "featured" => Ok(RepoFilter::Featured),
            "recent" => Ok(RepoFilter::Recent),
            other => Err(format!("unknown filter: {}", other)),
        }
    }
}

impl std::str::FromStr for RepoSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "updated" => Ok(RepoSort::Updated),
            "stars" => Ok(RepoSort::Stars),
            "forks" => Ok(RepoSort::Forks),
            "name" => Ok(RepoSort::Name),
            other => Err(format!("unknown sort: {}", other)),
        }
    }
}

impl RepoFilter {
    pub fn matches(&self, repo: &RemoteRepository, now: DateTime<Utc>) -> bool {
        match self {
            RepoFilter::All => true,
            RepoFilter::Featured => repo.star_count > 0,
            RepoFilter::Recent => repo
                .updated()
                .map(|updated| updated > now - Duration::days(RECENT_DAYS))
                .unwrap_or(false),
        }
    }
}

/// Filter then sort a repository list. Sorting is stable.
pub fn select(
    repos: Vec<RemoteRepository>,
    filter: RepoFilter,
    sort: RepoSort,
    now: DateTime<Utc>,
) -> Vec<RemoteRepository> {
    let mut repos: Vec<_> = repos
        .into_iter()
        .filter(|repo| filter.matches(repo, now))
        .collect();

    match sort {
        RepoSort::Updated => repos.sort_by_cached_key(|r| Reverse(r.updated())),
        RepoSort::Stars => repos.sort_by_key(|r| Reverse(r.star_count)),
        RepoSort::Forks => repos.sort_by_key(|r| Reverse(r.fork_count)),
        RepoSort::Name => repos.sort_by_cached_key(|r| r.name.to_lowercase()),
    }
    repos
}

/// Headline counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTotals {
    pub repositories: usize,
    pub stars: u64,
    pub forks: u64,
}

pub fn totals(repos: &[RemoteRepository]) -> RepoTotals {
    RepoTotals {
        repositories: repos.len(),
        stars: repos.iter().map(|r| r.star_count).sum(),
        forks: repos.iter().map(|r| r.fork_count).sum(),
    }
}

/// Share of repositories written mainly in one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub count: usize,
    pub percentage: u32,
    pub color: String,
}

/// Language breakdown in first-seen order. Repositories without a
/// language are left out of the total.
pub fn language_stats(repos: &[RemoteRepository]) -> Vec<LanguageStat> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        *counts.entry(language).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(name, count)| LanguageStat {
            name: name.to_string(),
            count,
            percentage: (count as f64 / total as f64 * 100.0).round() as u32,
            color: language_color(name).to_string(),
        })
        .collect()
}

/// Brand colour for a language, purple when unknown
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#F7DF1E",
        "TypeScript" => "#3178C6",
        "Python" => "#3776AB",
        "Java" => "#ED8B00",
        "C++" => "#00599C",
        "C#" => "#239120",
        "Go" => "#00ADD8",
        "Rust" => "#DEA584",
        "PHP" => "#777BB4",
        "Ruby" => "#CC342D",
        "Swift" => "#FA7343",
        "Kotlin" => "#7F52FF",
        "Dart" => "#00D4AA",
        "R" => "#276DC3",
        "Scala" => "#DC322F",
        "Jupyter Notebook" => "#DA5B0B",
        "HTML" => "#E34C26",
        "CSS" => "#563D7C",
        _ => DEFAULT_COLOR,
    }
}

/// Card image for a repository.
///
/// Uses the Open Graph preview when the owner is known, otherwise an inline
/// SVG tinted with the language colour.
pub fn repo_image(repo: &RemoteRepository) -> String {
    if !repo.owner.login.is_empty() && !repo.name.is_empty() {
        return format!(
            "https://opengraph.githubassets.com/{}/{}/{}",
            repo.id, repo.owner.login, repo.name
        );
    }

    let language = repo.language.as_deref().unwrap_or("Code");
    let color = language_color(language);
    let svg = format!(
        concat!(
            r#"<svg width="400" height="200" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<defs><linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">"#,
            r#"<stop offset="0%" style="stop-color:{color};stop-opacity:0.8"/>"#,
            r#"<stop offset="100%" style="stop-color:{color};stop-opacity:0.4"/>"#,
            r#"</linearGradient></defs>"#,
            r#"<rect width="100%" height="100%" fill="url(#grad)"/>"#,
            r#"<text x="50%" y="45%" font-family="Arial, sans-serif" font-size="24" font-weight="bold" text-anchor="middle" fill="white">{name}</text>"#,
            r#"<text x="50%" y="65%" font-family="Arial, sans-serif" font-size="14" text-anchor="middle" fill="white" opacity="0.8">{language}</text>"#,
            r#"</svg>"#
        ),
        color = color,
        name = xml_escape(&repo.name),
        language = xml_escape(language),
    );
    format!("data:image/svg+xml,{}", encode_component(&svg))
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
