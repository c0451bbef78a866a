//! Backend HTTP access
//!
//! Every call builds its own `reqwest::Client` and drops it on return, so no
//! connection state outlives a tool invocation.

use crate::pagination::PageRequest;
use crate::selection::RangeSelection;
use docu_common::{DocuError, Result};
use docu_config::BackendConfig;
use reqwest::Url;
use serde_json::{Map, Value};

const LIST_DOCS_PATH: &str = "/api/list_all_docs";
const FETCH_CONTENT_PATH: &str = "/api/fetch_doc_content";

/// Resolved backend endpoint URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    list_docs: Url,
    fetch_content: Url,
}

impl Endpoints {
    /// Derive endpoints from a backend base URL
    ///
    /// Endpoint paths are absolute, so any path on the base URL is replaced.
    pub fn from_base(base: &Url) -> Result<Self> {
        let join = |path: &str| {
            base.join(path).map_err(|e| {
                DocuError::ConfigError(format!("Cannot derive {} from {}: {}", path, base, e))
            })
        };

        Ok(Self {
            list_docs: join(LIST_DOCS_PATH)?,
            fetch_content: join(FETCH_CONTENT_PATH)?,
        })
    }

    /// Endpoints for a backend config section
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::from_base(&config.base_url()?)
    }

    /// Listing URL carrying the normalized page
    pub fn list_docs_url(&self, page: PageRequest) -> Url {
        let mut url = self.list_docs.clone();
        url.query_pairs_mut()
            .append_pair("limit", &page.limit.to_string())
            .append_pair("offset", &page.offset.to_string());
        url
    }

    /// Content URL for one document in the given retrieval mode
    pub fn content_url(&self, doc_uid: &str, selection: &RangeSelection) -> Result<Url> {
        let mut url = self.fetch_content.clone();
        url.path_segments_mut()
            .map_err(|_| DocuError::ConfigError("Backend URL cannot take path segments".to_string()))?
            .push(doc_uid);

        match selection {
            RangeSelection::Index => {}
            RangeSelection::Single { start, max_length } => {
                url.query_pairs_mut()
                    .append_pair("start", &start.to_string())
                    .append_pair("max_length", &max_length.to_string());
            }
            // Raw pass-through: commas and dashes stay literal
            RangeSelection::Multi { ranges } => {
                url.set_query(Some(&format!("ranges={}", ranges)));
            }
        }

        Ok(url)
    }
}

/// GET a JSON object from the backend
///
/// Non-2xx statuses become [`DocuError::Status`]; bodies that are not a JSON
/// object become [`DocuError::Decode`].
pub async fn get_json(operation: &str, url: Url) -> Result<Map<String, Value>> {
    tracing::debug!(operation, %url, "Backend request");

    let client = reqwest::Client::builder().build()?;
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(operation, status = status.as_u16(), "Backend returned error status");
        return Err(DocuError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            tracing::warn!(operation, kind = json_kind(&other), "Backend body is not a JSON object");
            Err(DocuError::Decode {
                operation: operation.to_string(),
            })
        }
        Err(e) => {
            tracing::warn!(operation, error = %e, "Backend body is not valid JSON");
            Err(DocuError::Decode {
                operation: operation.to_string(),
            })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
