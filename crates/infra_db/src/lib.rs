//! SQLite persistence layer
//!
//! Connection pool and schema management, one repository per aggregate, and
//! the database-backed implementations of the domain's [`SequenceStore`] and
//! [`VersionStore`] ports. Monetary amounts and UUIDs are stored as TEXT;
//! item lists travel as JSON columns on their owning aggregate.
//!
//! [`SequenceStore`]: domain_documents::SequenceStore
//! [`VersionStore`]: domain_documents::VersionStore

pub mod error;
pub mod pool;
pub mod repositories;
pub mod schema;
pub mod sequences;

pub use error::DatabaseError;
pub use pool::{create_pool, DatabaseConfig};
pub use repositories::{
    CustomerRepository, FilingRepository, InvoiceRepository, OrderRepository,
    PackingListRepository, ProductRepository, PurchaseOrderRepository, SqliteVersionLog,
};
pub use schema::init_schema;
pub use sequences::SqliteSequenceStore;
