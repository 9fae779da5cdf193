//! Configuration module

mod site;

pub use site::ContentConfig;
pub use site::DisplayConfig;
pub use site::GithubConfig;
pub use site::PageCopy;
pub use site::PagesConfig;
pub use site::PersonConfig;
pub use site::SiteConfig;
pub use site::SocialLink;
