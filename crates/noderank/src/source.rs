//! Endpoint list loading.
//!
//! The list is a JSON document carrying an ordered `blockProducerList`
//! array. Malformed or empty input is fatal: with nothing to probe the
//! run cannot proceed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::registry::{Endpoint, Registry};

/// Top-level endpoint list document.
#[derive(Debug, Serialize, Deserialize)]
pub struct EndpointDocument {
    #[serde(rename = "blockProducerList")]
    pub endpoints: Vec<Endpoint>,
}

/// Parse an endpoint document from raw JSON, preserving list order.
pub fn parse_endpoints(raw: &str) -> Result<Registry, SourceError> {
    let document: EndpointDocument = serde_json::from_str(raw)?;
    if document.endpoints.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(Registry::new(document.endpoints))
}

/// Load an endpoint document from disk.
pub fn load_endpoints(path: impl AsRef<Path>) -> Result<Registry, SourceError> {
    let raw = std::fs::read_to_string(path)?;
    parse_endpoints(&raw)
}
