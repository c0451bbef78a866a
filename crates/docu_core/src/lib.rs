//! Core adapter for Docuscribe
//!
//! Forwards catalog and content requests to the document backend, normalizing
//! inputs on the way out and reshaping responses on the way back.

pub mod args;
pub mod backend;
pub mod catalog;
pub mod content;
pub mod outcome;
pub mod pagination;
pub mod selection;

pub use backend::Endpoints;
pub use catalog::{CatalogListing, CatalogLister, LIST_ALL_DOCS};
pub use content::{ContentFetcher, ContentRequest, ContentSlice, FETCH_DOC_CONTENT};
pub use outcome::{ToolError, ToolOutcome};
pub use pagination::PageRequest;
pub use selection::RangeSelection;

use docu_common::Result;
use docu_config::BackendConfig;

/// Both tool components wired to one backend
#[derive(Debug, Clone)]
pub struct DocuAdapter {
    catalog: CatalogLister,
    content: ContentFetcher,
}

impl DocuAdapter {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            catalog: CatalogLister::new(endpoints.clone()),
            content: ContentFetcher::new(endpoints),
        }
    }

    /// Build from the `[backend]` config section
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Ok(Self::new(Endpoints::from_config(config)?))
    }

    pub async fn list_all_docs(&self, limit: i64, offset: i64) -> ToolOutcome<CatalogListing> {
        self.catalog.list(limit, offset).await
    }

    pub async fn fetch_doc_content(&self, request: &ContentRequest) -> ToolOutcome<ContentSlice> {
        self.content.fetch(request).await
    }
}
