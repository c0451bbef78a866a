//! Catalog listing (`list_all_docs`)

use crate::backend::{self, Endpoints};
use crate::outcome::{ToolError, ToolOutcome};
use crate::pagination::PageRequest;
use docu_common::{CatalogPage, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Tool and operation name
pub const LIST_ALL_DOCS: &str = "list_all_docs";

/// Backend listing body plus an echo of the page actually requested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogListing {
    #[serde(flatten)]
    pub body: Map<String, Value>,

    #[serde(rename = "_request")]
    pub request: PageRequest,
}

impl CatalogListing {
    fn new(mut body: Map<String, Value>, request: PageRequest) -> Self {
        // The echo replaces any backend field of the same name
        body.remove("_request");
        Self { body, request }
    }

    /// View of the `documents` array
    pub fn page(&self) -> Result<CatalogPage> {
        let page = serde_json::from_value(Value::Object(self.body.clone()))?;
        Ok(page)
    }
}

/// Lists catalog pages from the backend
#[derive(Debug, Clone)]
pub struct CatalogLister {
    endpoints: Endpoints,
}

impl CatalogLister {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    /// Serve `list_all_docs` with raw caller input
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, limit: i64, offset: i64) -> ToolOutcome<CatalogListing> {
        let page = PageRequest::new(limit, offset);
        if page.limit != limit || page.offset != offset {
            tracing::debug!(limit = page.limit, offset = page.offset, "Pagination clamped");
        }

        match self.fetch_page(page).await {
            Ok(listing) => ToolOutcome::Success(listing),
            Err(e) => ToolError::from_docu_error(LIST_ALL_DOCS, &e).into(),
        }
    }

    /// Fetch one normalized page
    pub async fn fetch_page(&self, page: PageRequest) -> Result<CatalogListing> {
        let body = backend::get_json(LIST_ALL_DOCS, self.endpoints.list_docs_url(page)).await?;
        Ok(CatalogListing::new(body, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_appends_request_echo() {
        let body = json!({"documents": [{"id": "abc123", "name": "Guide", "hashtags": []}]});
        let listing = CatalogListing::new(
            body.as_object().cloned().unwrap(),
            PageRequest::new(0, -5),
        );

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["_request"], json!({"limit": 1, "offset": 0}));
        assert_eq!(value["documents"][0]["id"], "abc123");
    }

    #[test]
    fn test_listing_overrides_backend_request_field() {
        let body = json!({"documents": [], "_request": "stale"});
        let listing = CatalogListing::new(
            body.as_object().cloned().unwrap(),
            PageRequest::new(10, 20),
        );

        let text = serde_json::to_string(&listing).unwrap();
        assert_eq!(text.matches("_request").count(), 1);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["_request"], json!({"limit": 10, "offset": 20}));
    }

    #[test]
    fn test_listing_keeps_backend_key_order() {
        let body: Map<String, Value> = serde_json::from_str(
            r#"{"total": 1, "documents": [{"name": "Guide", "id": "abc123", "hashtags": []}]}"#,
        )
        .unwrap();
        let listing = CatalogListing::new(body, PageRequest::default());

        let text = serde_json::to_string(&listing).unwrap();
        assert_eq!(
            text,
            r#"{"total":1,"documents":[{"name":"Guide","id":"abc123","hashtags":[]}],"_request":{"limit":100,"offset":0}}"#
        );
    }

    #[test]
    fn test_listing_page_view() {
        let body = json!({"documents": [
            {"id": "abc123", "name": "Guide", "hashtags": null},
            {"id": 7, "hashtags": [null]}
        ]});
        let listing =
            CatalogListing::new(body.as_object().cloned().unwrap(), PageRequest::default());
        let page = listing.page().unwrap();
        assert!(page.contains("abc123"));
        assert_eq!(page.documents.len(), 2);
    }
}
