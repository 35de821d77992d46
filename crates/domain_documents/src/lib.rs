//! Documents Domain - Export Paperwork
//!
//! This crate covers the paperwork generated from an export order:
//!
//! - **Invoices** in the three export flavours (proforma, pre-shipment,
//!   post-shipment/commercial), each a frozen snapshot of the order's items
//!   and figures at creation time
//! - **Packing lists** with package and weight breakdowns, priced nowhere
//! - **Regulatory filings** (shipping bills, LUT, drawback/RODTEP claims)
//! - The **numbering registry** that issues `{PREFIX}-{year}-{seq:05}`
//!   document numbers from atomic per-scope counters
//! - The **version tracker**, an append-only log of every generation event
//!   per document number and type

pub mod invoice;
pub mod packing_list;
pub mod filing;
pub mod numbering;
pub mod versioning;
pub mod error;

pub use invoice::{BankDetails, Invoice, InvoiceStatus, InvoiceType};
pub use packing_list::{PackingList, PackingListItem};
pub use filing::{FilingStatus, FilingType, RegulatoryFiling};
pub use numbering::{format_number, InMemorySequenceStore, NumberScope, NumberingRegistry, SequenceStore};
pub use versioning::{DocumentType, DocumentVersionRecord, InMemoryVersionLog, VersionStore};
pub use error::DocumentError;
