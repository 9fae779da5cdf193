//! Content module - front-matter files, collections and services

mod collection;
mod frontmatter;
mod item;
pub mod loader;
mod markdown;
pub mod service;

pub use collection::Collection;
pub use frontmatter::FrontMatter;
pub use item::{ContentItem, Metadata, TeamMember};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use service::{Service, ServiceSummary};
