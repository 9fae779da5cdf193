//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub person: PersonConfig,
    pub social: Vec<SocialLink>,
    pub pages: PagesConfig,
    /// Route path to enabled flag, in navigation order
    pub routes: IndexMap<String, bool>,
    pub display: DisplayConfig,
    pub content: ContentConfig,
    pub github: GithubConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut routes = IndexMap::new();
        for (path, enabled) in [
            ("/", true),
            ("/about", true),
            ("/work", true),
            ("/services", true),
            ("/blog", true),
            ("/gallery", false),
            ("/contact", false),
        ] {
            routes.insert(path.to_string(), enabled);
        }

        Self {
            person: PersonConfig::default(),
            social: Vec::new(),
            pages: PagesConfig::default(),
            routes,
            display: DisplayConfig::default(),
            content: ContentConfig::default(),
            github: GithubConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// The person the portfolio is about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonConfig {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub avatar: String,
    pub email: String,
    /// IANA timezone name, e.g. "Asia/Colombo"
    pub location: String,
    pub languages: Vec<String>,
    pub bio: String,
}

impl PersonConfig {
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A social profile link shown in the header and footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub name: String,
    pub icon: String,
    pub link: String,
}

/// Copy for a single top-level page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageCopy {
    pub path: String,
    pub label: String,
    pub title: String,
    pub description: String,
}

impl PageCopy {
    fn new(path: &str, label: &str) -> Self {
        Self {
            path: path.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }
}

/// Copy for every top-level page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    pub home: PageCopy,
    pub about: PageCopy,
    pub work: PageCopy,
    pub blog: PageCopy,
    pub services: PageCopy,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            home: PageCopy::new("/", "Home"),
            about: PageCopy::new("/about", "About"),
            work: PageCopy::new("/work", "Work"),
            blog: PageCopy::new("/blog", "Blog"),
            services: PageCopy::new("/services", "Services"),
        }
    }
}

/// Header widgets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub location: bool,
    pub time: bool,
    pub theme_switcher: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            location: true,
            time: true,
            theme_switcher: true,
        }
    }
}

/// Content directories, relative to the site base directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub work_dir: String,
    pub blog_dir: String,
    pub services_dir: String,
    pub public_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            work_dir: "content/work".to_string(),
            blog_dir: "content/blog".to_string(),
            services_dir: "content/services".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

/// Repository showcase settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Merge public repositories into the project list
    pub display: bool,
    pub username: String,
    pub api_base: String,
    pub per_page: u32,
    /// Image used for repositories on project cards
    pub placeholder_image: String,
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            display: true,
            username: String::new(),
            api_base: "https://api.github.com".to_string(),
            per_page: 100,
            placeholder_image: "/images/projects/github-placeholder.jpg".to_string(),
            user_agent: concat!("portfolio-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
