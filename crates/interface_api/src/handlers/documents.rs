//! Document generation handlers
//!
//! Every generation event, single download or batch, is appended to the
//! version log before the response leaves. The version stamped into the
//! rendered footer is the one the log assigns.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use core_kernel::{Currency, InvoiceId, PackingListId, ProductId, PurchaseOrderId};
use domain_documents::{DocumentType, VersionStore};
use domain_orders::Product;
use render_engine::{DocumentData, OutputFormat, RenderOptions};

use crate::dto::document::{
    BulkExportRequest, BulkExportResponse, RenderQuery, RenderResponse, VersionResponse,
};
use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Renders an invoice in the default PDF + Excel pair (or the requested
/// format) and records a new version
pub async fn generate_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
) -> Result<(StatusCode, Json<ApiResponse<RenderResponse>>), ApiError> {
    let invoice = state.invoices().get(InvoiceId::from(id)).await?;
    let data = invoice_data(&state, &invoice).await?;
    let response = generate(&state, DocumentType::Invoice, &data, &query).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}

/// Renders a packing list and records a new version
pub async fn generate_packing_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
) -> Result<(StatusCode, Json<ApiResponse<RenderResponse>>), ApiError> {
    let packing_list = state.packing_lists().get(PackingListId::from(id)).await?;
    let data = packing_list_data(&state, &packing_list).await?;
    let response = generate(&state, DocumentType::PackingList, &data, &query).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}

/// Renders a purchase order and records a new version
pub async fn generate_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
) -> Result<(StatusCode, Json<ApiResponse<RenderResponse>>), ApiError> {
    let po = state.purchase_orders().get(PurchaseOrderId::from(id)).await?;
    let data = purchase_order_data(&state, &po).await?;
    let response = generate(&state, DocumentType::PurchaseOrder, &data, &query).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
}

/// Streams a freshly rendered invoice file (`?format=` defaults to pdf)
pub async fn download_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let invoice = state.invoices().get(InvoiceId::from(id)).await?;
    let data = invoice_data(&state, &invoice).await?;
    download(&state, DocumentType::Invoice, &data, &query).await
}

/// Streams a freshly rendered packing list file
pub async fn download_packing_list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let packing_list = state.packing_lists().get(PackingListId::from(id)).await?;
    let data = packing_list_data(&state, &packing_list).await?;
    download(&state, DocumentType::PackingList, &data, &query).await
}

/// Streams a freshly rendered purchase order file
pub async fn download_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let po = state.purchase_orders().get(PurchaseOrderId::from(id)).await?;
    let data = purchase_order_data(&state, &po).await?;
    download(&state, DocumentType::PurchaseOrder, &data, &query).await
}

/// Renders a batch of invoices into one zip archive
///
/// A document that fails to render is reported in the response but never
/// aborts the batch; an unknown invoice id is reported the same way.
pub async fn bulk_export(
    State(state): State<AppState>,
    Json(request): Json<BulkExportRequest>,
) -> Result<Json<ApiResponse<BulkExportResponse>>, ApiError> {
    let mut batch = Vec::new();
    let mut missing = Vec::new();
    for id in &request.invoice_ids {
        match state.invoices().find(InvoiceId::from(*id)).await? {
            Some(invoice) => batch.push(invoice_data(&state, &invoice).await?),
            None => missing.push(id.to_string()),
        }
    }

    let mut options = RenderOptions::default();
    if let Some(format) = &request.format {
        options = options.with_format(parse_format(format)?);
    }

    let report = state
        .renderer
        .render_bulk(&batch, &options, "invoice-export")?;

    // each archived document counts as a generation event
    let archive = report.archive_path.display().to_string();
    for number in &report.generated {
        state
            .versions
            .record(DocumentType::Invoice, number, vec![archive.clone()])
            .await?;
    }

    let mut response = BulkExportResponse::from(&report);
    for id in missing {
        response.failures.push(crate::dto::document::BulkFailureResponse {
            document_number: id,
            reason: "Invoice not found".to_string(),
        });
        response.complete = false;
    }
    Ok(Json(ApiResponse::ok(response)))
}

/// Returns the version history of a document, oldest first
pub async fn versions(
    State(state): State<AppState>,
    Path((doc_type, number)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<VersionResponse>>>, ApiError> {
    let document_type: DocumentType = doc_type
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown document type: {doc_type}")))?;
    let history = state.versions.history(document_type, &number).await?;
    Ok(Json(ApiResponse::ok(
        history.iter().map(VersionResponse::from).collect(),
    )))
}

async fn generate(
    state: &AppState,
    document_type: DocumentType,
    data: &DocumentData,
    query: &RenderQuery,
) -> Result<RenderResponse, ApiError> {
    let options = build_options(state, document_type, data, query, None).await?;
    let rendered = state.renderer.render(data, &options)?;
    let record = state
        .versions
        .record(document_type, &data.number, rendered.file_paths())
        .await?;
    Ok(RenderResponse::new(&rendered, record.version))
}

async fn download(
    state: &AppState,
    document_type: DocumentType,
    data: &DocumentData,
    query: &RenderQuery,
) -> Result<Response, ApiError> {
    let options =
        build_options(state, document_type, data, query, Some(OutputFormat::Pdf)).await?;
    let format = options.effective_formats()[0];

    let rendered = state.renderer.render(data, &options)?;
    state
        .versions
        .record(document_type, &data.number, rendered.file_paths())
        .await?;

    let path = rendered
        .path_for(format)
        .ok_or_else(|| ApiError::Internal("Rendered file missing".to_string()))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("document.{}", format.extension()));

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Builds render options, pinning the version number the log will assign
async fn build_options(
    state: &AppState,
    document_type: DocumentType,
    data: &DocumentData,
    query: &RenderQuery,
    default_format: Option<OutputFormat>,
) -> Result<RenderOptions, ApiError> {
    let history = state.versions.history(document_type, &data.number).await?;
    let mut options = RenderOptions::default().with_version(history.len() as u32 + 1);

    match (&query.format, default_format) {
        (Some(format), _) => options = options.with_format(parse_format(format)?),
        (None, Some(format)) => options = options.with_format(format),
        (None, None) => {}
    }
    if let Some(watermark) = &query.watermark {
        options = options.with_watermark(watermark.clone());
    }
    Ok(options)
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    format
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown output format: {format}")))
}

async fn product_map(state: &AppState) -> Result<HashMap<ProductId, Product>, ApiError> {
    let products = state.products().all().await?;
    Ok(products.into_iter().map(|p| (p.id, p)).collect())
}

/// Hydrates an invoice into renderable form; a missing customer or product
/// degrades to placeholders rather than failing the render
async fn invoice_data(
    state: &AppState,
    invoice: &domain_documents::Invoice,
) -> Result<DocumentData, ApiError> {
    let customer = state.customers().find(invoice.customer_id).await?;
    let products = product_map(state).await?;
    Ok(DocumentData::from_invoice(
        invoice,
        customer.as_ref(),
        &products,
        &state.config.export_rates(),
        state.company(),
    ))
}

async fn packing_list_data(
    state: &AppState,
    packing_list: &domain_documents::PackingList,
) -> Result<DocumentData, ApiError> {
    let order = state.orders().find(packing_list.order_id).await?;
    let customer = match &order {
        Some(order) => state.customers().find(order.customer_id).await?,
        None => None,
    };
    let currency = order.map(|o| o.currency).unwrap_or(Currency::USD);
    let products = product_map(state).await?;
    Ok(DocumentData::from_packing_list(
        packing_list,
        customer.as_ref(),
        &products,
        currency,
        state.company(),
    ))
}

async fn purchase_order_data(
    state: &AppState,
    po: &domain_orders::PurchaseOrder,
) -> Result<DocumentData, ApiError> {
    let products = product_map(state).await?;
    Ok(DocumentData::from_purchase_order(po, &products, state.company()))
}
