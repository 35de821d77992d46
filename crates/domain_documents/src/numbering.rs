//! Document numbering registry
//!
//! Issues human-readable document numbers of the form
//! `{PREFIX}-{year}-{seq:05}` (e.g. `ORD-2025-00001`), one sequence per
//! (prefix, year). Sequences are backed by an atomic counter behind the
//! [`SequenceStore`] trait - never by counting existing rows, which would
//! race under concurrent creation and hand out duplicates. Numbers, once
//! issued and persisted on an entity, are never changed or reused.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::DocumentError;
use crate::invoice::InvoiceType;

/// Identifies which sequence a number is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberScope {
    Order,
    Invoice(InvoiceType),
    PackingList,
    PurchaseOrder,
}

impl NumberScope {
    /// The document number prefix for this scope
    pub fn prefix(&self) -> &'static str {
        match self {
            NumberScope::Order => "ORD",
            NumberScope::Invoice(invoice_type) => invoice_type.number_prefix(),
            NumberScope::PackingList => "PL",
            NumberScope::PurchaseOrder => "PO",
        }
    }
}

impl fmt::Display for NumberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Formats a document number from its parts
pub fn format_number(prefix: &str, year: i32, sequence: u32) -> String {
    format!("{prefix}-{year}-{sequence:05}")
}

/// Storage backend for per-(prefix, year) counters
///
/// `next_sequence` must atomically increment and return the counter;
/// implementations serialize issuance per scope so two concurrent callers
/// can never see the same value.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    async fn next_sequence(&self, prefix: &str, year: i32) -> Result<u32, DocumentError>;
}

/// Issues document numbers from a [`SequenceStore`]
#[derive(Clone)]
pub struct NumberingRegistry {
    store: Arc<dyn SequenceStore>,
}

impl NumberingRegistry {
    pub fn new(store: Arc<dyn SequenceStore>) -> Self {
        Self { store }
    }

    /// Issues the next number for a scope, in the current calendar year
    pub async fn next_number(&self, scope: NumberScope) -> Result<String, DocumentError> {
        self.next_number_for_year(scope, Utc::now().year()).await
    }

    /// Issues the next number for a scope and an explicit year
    pub async fn next_number_for_year(
        &self,
        scope: NumberScope,
        year: i32,
    ) -> Result<String, DocumentError> {
        let prefix = scope.prefix();
        let sequence = self.store.next_sequence(prefix, year).await?;
        Ok(format_number(prefix, year, sequence))
    }
}

/// Mutex-guarded in-memory sequence store
///
/// Backs domain tests and single-process tooling; production uses the
/// SQLite-backed store in `infra_db`.
#[derive(Default)]
pub struct InMemorySequenceStore {
    counters: Mutex<HashMap<(String, i32), u32>>,
}

impl InMemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn next_sequence(&self, prefix: &str, year: i32) -> Result<u32, DocumentError> {
        let mut counters = self.counters.lock().await;
        let counter = counters.entry((prefix.to_string(), year)).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }
}
