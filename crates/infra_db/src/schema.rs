//! Schema creation
//!
//! Statements are idempotent so startup can always run them; there is no
//! separate migration history for now.

use sqlx::SqlitePool;

use crate::error::DatabaseError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    address     TEXT NOT NULL,
    city        TEXT,
    country     TEXT NOT NULL,
    email       TEXT,
    phone       TEXT,
    tax_id      TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id                  TEXT PRIMARY KEY,
    name                TEXT NOT NULL,
    hsn_code            TEXT,
    dosage_form         TEXT,
    strength            TEXT,
    unit                TEXT NOT NULL,
    default_unit_price  TEXT,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    id            TEXT PRIMARY KEY,
    order_number  TEXT NOT NULL UNIQUE,
    customer_id   TEXT NOT NULL REFERENCES customers(id),
    ordered_at    TEXT NOT NULL,
    currency      TEXT NOT NULL,
    items         TEXT NOT NULL,
    subtotal      TEXT NOT NULL,
    igst          TEXT NOT NULL,
    drawback      TEXT NOT NULL,
    rodtep        TEXT NOT NULL,
    total_amount  TEXT NOT NULL,
    status        TEXT NOT NULL,
    notes         TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id);

CREATE TABLE IF NOT EXISTS invoices (
    id              TEXT PRIMARY KEY,
    invoice_number  TEXT NOT NULL UNIQUE,
    invoice_type    TEXT NOT NULL,
    order_id        TEXT NOT NULL REFERENCES orders(id),
    customer_id     TEXT NOT NULL,
    invoice_date    TEXT NOT NULL,
    due_date        TEXT,
    currency        TEXT NOT NULL,
    items           TEXT NOT NULL,
    subtotal        TEXT NOT NULL,
    igst            TEXT NOT NULL,
    drawback        TEXT NOT NULL,
    rodtep          TEXT NOT NULL,
    total_amount    TEXT NOT NULL,
    bank_details    TEXT NOT NULL,
    terms           TEXT,
    status          TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    UNIQUE(order_id, invoice_type)
);
CREATE INDEX IF NOT EXISTS idx_invoices_order ON invoices(order_id);

CREATE TABLE IF NOT EXISTS packing_lists (
    id                   TEXT PRIMARY KEY,
    packing_list_number  TEXT NOT NULL UNIQUE,
    order_id             TEXT NOT NULL UNIQUE REFERENCES orders(id),
    invoice_id           TEXT,
    date                 TEXT NOT NULL,
    items                TEXT NOT NULL,
    shipping_marks       TEXT,
    notes                TEXT,
    created_at           TEXT NOT NULL,
    updated_at           TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS purchase_orders (
    id                TEXT PRIMARY KEY,
    po_number         TEXT NOT NULL UNIQUE,
    supplier_name     TEXT NOT NULL,
    supplier_address  TEXT,
    ordered_at        TEXT NOT NULL,
    currency          TEXT NOT NULL,
    items             TEXT NOT NULL,
    tax_rate          TEXT NOT NULL,
    subtotal          TEXT NOT NULL,
    tax               TEXT NOT NULL,
    total             TEXT NOT NULL,
    status            TEXT NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS filings (
    id                TEXT PRIMARY KEY,
    filing_type       TEXT NOT NULL,
    reference_number  TEXT,
    order_id          TEXT,
    filed_on          TEXT,
    status            TEXT NOT NULL,
    remarks           TEXT,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS document_sequences (
    prefix  TEXT NOT NULL,
    year    INTEGER NOT NULL,
    seq     INTEGER NOT NULL,
    PRIMARY KEY (prefix, year)
);

CREATE TABLE IF NOT EXISTS document_versions (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    document_type    TEXT NOT NULL,
    document_number  TEXT NOT NULL,
    version          INTEGER NOT NULL,
    created_at       TEXT NOT NULL,
    files            TEXT NOT NULL,
    UNIQUE(document_type, document_number, version)
);
CREATE INDEX IF NOT EXISTS idx_versions_document
    ON document_versions(document_type, document_number);
"#;

/// Creates all tables and indexes if they do not exist
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::debug!("schema initialized");
    Ok(())
}
