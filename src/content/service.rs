//! Service listings

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::loader::{ContentLoader, Document};
use crate::error::ContentError;

/// Service pages may be plain markdown or MDX
const SERVICE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// A service offered, as shown on the services index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
}

/// A single service page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
}

impl From<Document> for Service {
    fn from(doc: Document) -> Self {
        Self {
            title: doc.front_matter.title.unwrap_or_default(),
            description: doc.front_matter.description.unwrap_or_default(),
            slug: doc.slug,
            content: doc.body,
        }
    }
}

impl From<Service> for ServiceSummary {
    fn from(service: Service) -> Self {
        Self {
            slug: service.slug,
            title: service.title,
            description: service.description,
        }
    }
}

/// Every service in `dir`, in listing order
pub fn load_services(dir: &Path) -> Result<Vec<ServiceSummary>, ContentError> {
    let documents = ContentLoader::with_extensions(SERVICE_EXTENSIONS).load_documents(dir)?;
    Ok(documents
        .into_iter()
        .map(|doc| Service::from(doc).into())
        .collect())
}

/// One service by slug, or `None` if there is no such page
pub fn load_service(dir: &Path, slug: &str) -> Result<Option<Service>, ContentError> {
    Ok(ContentLoader::with_extensions(SERVICE_EXTENSIONS)
        .find(dir, slug)?
        .map(Service::from))
}
