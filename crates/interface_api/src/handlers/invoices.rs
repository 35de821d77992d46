//! Invoice handlers
//!
//! Invoices are created from orders and freeze the order's items and figures
//! at that moment. The unique (order, invoice type) constraint surfaces as a
//! 409 when a second invoice of the same flavour is requested.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use uuid::Uuid;

use core_kernel::{InvoiceId, OrderId};
use domain_documents::{Invoice, NumberScope};

use crate::dto::invoice::{CreateInvoiceRequest, InvoiceResponse, UpdateInvoiceRequest};
use crate::dto::{ApiResponse, PageQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates an invoice from an order
pub async fn create_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvoiceResponse>>), ApiError> {
    let order = state.orders().get(OrderId::from(order_id)).await?;
    if order.items.is_empty() {
        return Err(ApiError::Validation(
            "Cannot invoice an order with no items".to_string(),
        ));
    }

    let bank_details = request
        .bank_details
        .map(Into::into)
        .unwrap_or_else(|| state.default_bank_details());

    // invoice numbers are drawn from the current year's sequence for the type
    let invoice_number = state
        .registry
        .next_number_for_year(
            NumberScope::Invoice(request.invoice_type),
            Utc::now().year(),
        )
        .await?;

    let mut invoice = Invoice::from_order(invoice_number, request.invoice_type, &order, bank_details);
    invoice.due_date = request.due_date;
    invoice.terms = request.terms;

    state.invoices().insert(&invoice).await?;
    tracing::info!(
        invoice = %invoice.invoice_number,
        order = %order.order_number,
        "invoice created"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(InvoiceResponse::from(&invoice))),
    ))
}

/// Lists the invoices of one order
pub async fn list_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<InvoiceResponse>>>, ApiError> {
    let order_id = OrderId::from(order_id);
    state.orders().get(order_id).await?;
    let invoices = state.invoices().list_by_order(order_id).await?;
    Ok(Json(ApiResponse::ok(
        invoices.iter().map(InvoiceResponse::from).collect(),
    )))
}

/// Lists invoices, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<InvoiceResponse>>>, ApiError> {
    let (limit, offset) = page.limit_offset();
    let repo = state.invoices();
    let invoices = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    let data = invoices.iter().map(InvoiceResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, page.pagination(total))))
}

/// Gets an invoice by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, ApiError> {
    let invoice = state.invoices().get(InvoiceId::from(id)).await?;
    Ok(Json(ApiResponse::ok(InvoiceResponse::from(&invoice))))
}

/// Updates the invoice's mutable fields (due date, terms); items and figures
/// are frozen at creation
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, ApiError> {
    let repo = state.invoices();
    let mut invoice = repo.get(InvoiceId::from(id)).await?;

    if request.due_date.is_some() {
        invoice.due_date = request.due_date;
    }
    if request.terms.is_some() {
        invoice.terms = request.terms;
    }
    invoice.updated_at = Utc::now();

    repo.update(&invoice).await?;
    Ok(Json(ApiResponse::ok(InvoiceResponse::from(&invoice))))
}

/// Issues a draft invoice
pub async fn issue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, ApiError> {
    let repo = state.invoices();
    let mut invoice = repo.get(InvoiceId::from(id)).await?;
    invoice.issue()?;
    repo.update(&invoice).await?;
    Ok(Json(ApiResponse::ok(InvoiceResponse::from(&invoice))))
}

/// Marks an issued invoice as paid
pub async fn mark_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, ApiError> {
    let repo = state.invoices();
    let mut invoice = repo.get(InvoiceId::from(id)).await?;
    invoice.mark_paid()?;
    repo.update(&invoice).await?;
    Ok(Json(ApiResponse::ok(InvoiceResponse::from(&invoice))))
}

/// Cancels an invoice
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, ApiError> {
    let repo = state.invoices();
    let mut invoice = repo.get(InvoiceId::from(id)).await?;
    invoice.cancel()?;
    repo.update(&invoice).await?;
    Ok(Json(ApiResponse::ok(InvoiceResponse::from(&invoice))))
}
