//! Public repository listing from the code-hosting API

mod client;
pub(crate) mod repository;
pub mod showcase;

pub use client::RepoFetcher;
pub use repository::{filter_showcase, Owner, RemoteRepository};
pub use showcase::{LanguageStat, RepoFilter, RepoSort, RepoTotals};
