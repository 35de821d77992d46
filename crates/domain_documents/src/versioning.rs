//! Document version tracking
//!
//! Every generation event for a document number is appended to a version log
//! so prior renders can be audited and re-downloaded. The log is append-only:
//! entries are never mutated or deleted, and versions are monotonic per
//! (document type, document number).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::Mutex;

use crate::error::DocumentError;

/// The kinds of documents the renderer produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    PackingList,
    PurchaseOrder,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::PackingList => "packing_list",
            DocumentType::PurchaseOrder => "purchase_order",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(DocumentType::Invoice),
            "packing_list" => Ok(DocumentType::PackingList),
            "purchase_order" => Ok(DocumentType::PurchaseOrder),
            other => Err(DocumentError::validation(format!(
                "Unknown document type: {other}"
            ))),
        }
    }
}

/// One generation event for a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVersionRecord {
    pub document_type: DocumentType,
    pub document_number: String,
    /// Monotonic per (type, number), starting at 1
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    /// Paths of the files produced by this generation
    pub files: Vec<String>,
}

/// Append-only storage for version records
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Appends a generation event, assigning `version = prior count + 1`
    async fn record(
        &self,
        document_type: DocumentType,
        document_number: &str,
        files: Vec<String>,
    ) -> Result<DocumentVersionRecord, DocumentError>;

    /// Returns the full history for a document, oldest first
    async fn history(
        &self,
        document_type: DocumentType,
        document_number: &str,
    ) -> Result<Vec<DocumentVersionRecord>, DocumentError>;
}

/// In-memory append-only version log
#[derive(Default)]
pub struct InMemoryVersionLog {
    entries: Mutex<HashMap<(DocumentType, String), Vec<DocumentVersionRecord>>>,
}

impl InMemoryVersionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VersionStore for InMemoryVersionLog {
    async fn record(
        &self,
        document_type: DocumentType,
        document_number: &str,
        files: Vec<String>,
    ) -> Result<DocumentVersionRecord, DocumentError> {
        let mut entries = self.entries.lock().await;
        let history = entries
            .entry((document_type, document_number.to_string()))
            .or_default();
        let record = DocumentVersionRecord {
            document_type,
            document_number: document_number.to_string(),
            version: history.len() as u32 + 1,
            timestamp: Utc::now(),
            files,
        };
        history.push(record.clone());
        Ok(record)
    }

    async fn history(
        &self,
        document_type: DocumentType,
        document_number: &str,
    ) -> Result<Vec<DocumentVersionRecord>, DocumentError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(&(document_type, document_number.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
