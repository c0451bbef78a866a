//! Document content retrieval (`fetch_doc_content`)

use crate::args;
use crate::backend::{self, Endpoints};
use crate::catalog::CatalogLister;
use crate::outcome::{ToolError, ToolOutcome};
use crate::pagination::PageRequest;
use crate::selection::RangeSelection;
use docu_common::DocuError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool and operation name
pub const FETCH_DOC_CONTENT: &str = "fetch_doc_content";

/// Caller arguments for `fetch_doc_content`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentRequest {
    pub doc_uid: String,
    #[serde(default, deserialize_with = "args::saturating_opt_i64")]
    pub start: Option<i64>,
    #[serde(default, deserialize_with = "args::saturating_opt_i64")]
    pub max_length: Option<i64>,
    #[serde(default)]
    pub ranges: Option<String>,
}

impl ContentRequest {
    pub fn index(doc_uid: impl Into<String>) -> Self {
        Self {
            doc_uid: doc_uid.into(),
            ..Default::default()
        }
    }

    pub fn selection(&self) -> RangeSelection {
        RangeSelection::select(self.start, self.max_length, self.ranges.clone())
    }
}

/// Reshaped backend content response
///
/// `has_more` and `next_start` are present only when `meta` carries them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSlice {
    pub document: Value,
    pub meta: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start: Option<Value>,
}

impl ContentSlice {
    pub fn from_body(mut body: Map<String, Value>) -> Self {
        let document = body
            .remove("document")
            .unwrap_or_else(|| Value::Object(Map::new()));
        let meta = body
            .remove("meta")
            .unwrap_or_else(|| Value::Object(Map::new()));

        let has_more = meta.get("has_more").cloned();
        let next_start = meta.get("next_start").cloned();

        Self {
            document,
            meta,
            has_more,
            next_start,
        }
    }
}

/// Validates document ids against the catalog, then fetches content
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    endpoints: Endpoints,
    catalog: CatalogLister,
}

impl ContentFetcher {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            catalog: CatalogLister::new(endpoints.clone()),
            endpoints,
        }
    }

    /// Serve `fetch_doc_content`
    #[tracing::instrument(skip(self, request), fields(doc_uid = %request.doc_uid))]
    pub async fn fetch(&self, request: &ContentRequest) -> ToolOutcome<ContentSlice> {
        if !self.document_exists(&request.doc_uid).await {
            let err = DocuError::DocumentNotFound {
                doc_uid: request.doc_uid.clone(),
            };
            tracing::info!("Unknown document requested");
            return ToolError::from_docu_error(FETCH_DOC_CONTENT, &err).into();
        }

        let selection = request.selection();
        tracing::debug!(mode = selection.mode(), "Content mode selected");

        let url = match self.endpoints.content_url(&request.doc_uid, &selection) {
            Ok(url) => url,
            Err(e) => return ToolError::from_docu_error(FETCH_DOC_CONTENT, &e).into(),
        };

        match backend::get_json(FETCH_DOC_CONTENT, url).await {
            Ok(body) => ToolOutcome::Success(ContentSlice::from_body(body)),
            Err(e) => ToolError::from_docu_error(FETCH_DOC_CONTENT, &e).into(),
        }
    }

    /// Check `doc_uid` against a freshly fetched full catalog
    ///
    /// Only each entry's `id` is read. Fails closed: a catalog that cannot be
    /// fetched or decoded, or whose `documents` is not an array, counts as
    /// empty. The cause is logged since "not found" then also means "not checked".
    pub async fn document_exists(&self, doc_uid: &str) -> bool {
        let page = self
            .catalog
            .fetch_page(PageRequest::FULL_CATALOG)
            .await
            .and_then(|listing| listing.page());

        match page {
            Ok(page) => page.contains(doc_uid),
            Err(e) => {
                tracing::warn!(doc_uid, error = %e, "Catalog unavailable, treating as empty");
                false
            }
        }
    }
}
