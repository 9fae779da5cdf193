//! Named content collections

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ContentConfig;

/// A group of content items sharing a directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    #[default]
    Work,
    Blog,
}

impl Collection {
    /// Interpret the `type` query value. Anything other than `blog`
    /// selects the work collection.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("blog") => Collection::Blog,
            _ => Collection::Work,
        }
    }

    /// Directory holding this collection
    pub fn dir(&self, base_dir: &Path, content: &ContentConfig) -> PathBuf {
        match self {
            Collection::Work => base_dir.join(&content.work_dir),
            Collection::Blog => base_dir.join(&content.blog_dir),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Work => "work",
            Collection::Blog => "blog",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        assert_eq!(Collection::from_query(Some("blog")), Collection::Blog);
        assert_eq!(Collection::from_query(Some("work")), Collection::Work);
        assert_eq!(Collection::from_query(Some("gallery")), Collection::Work);
        assert_eq!(Collection::from_query(None), Collection::Work);
    }

    #[test]
    fn test_dir() {
        let content = ContentConfig::default();
        let base = Path::new("/srv/site");
        assert_eq!(
            Collection::Blog.dir(base, &content),
            PathBuf::from("/srv/site/content/blog")
        );
    }
}
