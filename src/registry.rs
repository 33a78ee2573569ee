//! Identifier registry boundary.
//!
//! The registry itself (an HTTP service) is an external collaborator and
//! stays out of this crate. What lives here is the data contract: the upload
//! payload built from the inventory, the identifier-map response shape, and
//! an [`IdSource`] seam with a JSON-file implementation so synchronization
//! can be driven from a previously fetched map.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::errors::{Result, ScanError};
use crate::inventory::TestRecord;
use crate::sync::IdMap;

/// Inventory upload payload, as the registry's load endpoint expects it.
#[derive(Debug, Serialize)]
pub struct SyncPayload<'a> {
    pub tests: &'a [TestRecord],
    pub framework: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    pub sync: bool,
    #[serde(rename = "no-detach")]
    pub no_detach: bool,
    #[serde(rename = "structure")]
    pub keep_structure: bool,
}

impl<'a> SyncPayload<'a> {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::registry(format!("cannot serialize payload: {e}")))
    }
}

/// Where identifier maps come from.
pub trait IdSource {
    fn fetch_ids(&self) -> Result<IdMap>;
}

/// Reads an identifier map from a JSON file, shaped exactly like the
/// registry's test_data response: `{"suites": {...}, "tests": {...}}`.
pub struct JsonIdFile {
    path: PathBuf,
}

impl JsonIdFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IdSource for JsonIdFile {
    fn fetch_ids(&self) -> Result<IdMap> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| ScanError::registry(format!("cannot read {}: {e}", self.path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| ScanError::registry(format!("malformed id map {}: {e}", self.path.display())))
    }
}
