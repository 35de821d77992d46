//! HTTP API Layer
//!
//! This crate provides the REST API for the export documentation system
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per aggregate, plus document generation
//! - **DTOs**: Request/response objects with the
//!   `{"status", "data", "pagination"?}` envelope
//! - **Error Handling**: Consistent error responses mapped from the domain
//!   and persistence error types
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::ApiConfig};
//!
//! let state = AppState::new(pool, ApiConfig::default())?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_documents::{BankDetails, NumberingRegistry};
use infra_db::{
    CustomerRepository, FilingRepository, InvoiceRepository, OrderRepository,
    PackingListRepository, ProductRepository, PurchaseOrderRepository, SqliteSequenceStore,
    SqliteVersionLog,
};
use render_engine::{CompanyProfile, DocumentRenderer, RenderError};

use crate::config::ApiConfig;
use crate::handlers::{
    customers, documents, filings, health, invoices, orders, packing_lists, products,
    purchase_orders,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: ApiConfig,
    pub registry: NumberingRegistry,
    pub versions: Arc<SqliteVersionLog>,
    pub renderer: Arc<DocumentRenderer>,
}

impl AppState {
    /// Wires the registry, version log and renderer onto a database pool
    pub fn new(pool: SqlitePool, config: ApiConfig) -> Result<Self, RenderError> {
        let renderer = Arc::new(DocumentRenderer::new(&config.output_dir)?);
        let registry = NumberingRegistry::new(Arc::new(SqliteSequenceStore::new(pool.clone())));
        let versions = Arc::new(SqliteVersionLog::new(pool.clone()));
        Ok(Self {
            pool,
            config,
            registry,
            versions,
            renderer,
        })
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.pool.clone())
    }

    pub fn packing_lists(&self) -> PackingListRepository {
        PackingListRepository::new(self.pool.clone())
    }

    pub fn purchase_orders(&self) -> PurchaseOrderRepository {
        PurchaseOrderRepository::new(self.pool.clone())
    }

    pub fn filings(&self) -> FilingRepository {
        FilingRepository::new(self.pool.clone())
    }

    /// The exporting company's letterhead block
    pub fn company(&self) -> CompanyProfile {
        CompanyProfile::default()
    }

    /// Bank details printed on invoices when a request carries none
    pub fn default_bank_details(&self) -> BankDetails {
        BankDetails {
            bank_name: "State Bank of India".to_string(),
            account_number: "00000012345678".to_string(),
            swift_code: "SBININBB104".to_string(),
            ifsc_code: "SBIN0000300".to_string(),
            branch: Some("Fort, Mumbai".to_string()),
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no versioned prefix)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route("/", post(customers::create))
        .route("/", get(customers::list))
        .route("/:id", get(customers::get))
        .route("/:id", put(customers::update))
        .route("/:id", delete(customers::remove))
        .route("/:id/orders", get(customers::list_orders));

    let product_routes = Router::new()
        .route("/", post(products::create))
        .route("/", get(products::list))
        .route("/:id", get(products::get))
        .route("/:id", put(products::update))
        .route("/:id", delete(products::remove));

    let order_routes = Router::new()
        .route("/", post(orders::create))
        .route("/", get(orders::list))
        .route("/:id", get(orders::get))
        .route("/:id/items", put(orders::update_items))
        .route("/:id/status", post(orders::transition))
        .route("/:id/invoices", post(invoices::create_for_order))
        .route("/:id/invoices", get(invoices::list_for_order))
        .route("/:id/packing-lists", post(packing_lists::create_for_order));

    let invoice_routes = Router::new()
        .route("/", get(invoices::list))
        .route("/:id", get(invoices::get))
        .route("/:id", put(invoices::update))
        .route("/:id/issue", post(invoices::issue))
        .route("/:id/pay", post(invoices::mark_paid))
        .route("/:id/cancel", post(invoices::cancel))
        .route("/:id/document", get(documents::download_invoice))
        .route("/:id/documents", post(documents::generate_invoice));

    let packing_list_routes = Router::new()
        .route("/", get(packing_lists::list))
        .route("/:id", get(packing_lists::get))
        .route("/:id", put(packing_lists::update))
        .route("/:id/document", get(documents::download_packing_list))
        .route("/:id/documents", post(documents::generate_packing_list));

    let purchase_order_routes = Router::new()
        .route("/", post(purchase_orders::create))
        .route("/", get(purchase_orders::list))
        .route("/:id", get(purchase_orders::get))
        .route("/:id/items", put(purchase_orders::update_items))
        .route("/:id/status", post(purchase_orders::transition))
        .route("/:id/document", get(documents::download_purchase_order))
        .route("/:id/documents", post(documents::generate_purchase_order));

    let filing_routes = Router::new()
        .route("/", post(filings::create))
        .route("/", get(filings::list))
        .route("/:id", get(filings::get))
        .route("/:id/file", post(filings::mark_filed))
        .route("/:id/resolve", post(filings::resolve));

    let document_routes = Router::new()
        .route("/bulk", post(documents::bulk_export))
        .route("/:doc_type/:number/versions", get(documents::versions));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/products", product_routes)
        .nest("/orders", order_routes)
        .nest("/invoices", invoice_routes)
        .nest("/packing-lists", packing_list_routes)
        .nest("/purchase-orders", purchase_order_routes)
        .nest("/filings", filing_routes)
        .nest("/documents", document_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
