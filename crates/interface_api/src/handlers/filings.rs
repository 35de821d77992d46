//! Regulatory filing handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{FilingId, OrderId};
use domain_documents::RegulatoryFiling;

use crate::dto::filing::{
    CreateFilingRequest, FileFilingRequest, FilingResponse, ResolveFilingRequest,
};
use crate::dto::{ApiResponse, PageQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates a filing record
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateFilingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FilingResponse>>), ApiError> {
    let mut filing = RegulatoryFiling::new(request.filing_type);
    if let Some(order_id) = request.order_id {
        let order_id = OrderId::from(order_id);
        state.orders().get(order_id).await?;
        filing = filing.for_order(order_id);
    }

    state.filings().insert(&filing).await?;
    tracing::info!(filing = %filing.id, filing_type = %filing.filing_type, "filing created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(FilingResponse::from(&filing))),
    ))
}

/// Lists filings, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<FilingResponse>>>, ApiError> {
    let (limit, offset) = page.limit_offset();
    let repo = state.filings();
    let filings = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    let data = filings.iter().map(FilingResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, page.pagination(total))))
}

/// Gets a filing by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FilingResponse>>, ApiError> {
    let filing = state.filings().get(FilingId::from(id)).await?;
    Ok(Json(ApiResponse::ok(FilingResponse::from(&filing))))
}

/// Records that the filing was submitted to the authority
pub async fn mark_filed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FileFilingRequest>,
) -> Result<Json<ApiResponse<FilingResponse>>, ApiError> {
    let repo = state.filings();
    let mut filing = repo.get(FilingId::from(id)).await?;
    filing.mark_filed(request.reference_number, request.filed_on)?;
    repo.update(&filing).await?;
    Ok(Json(ApiResponse::ok(FilingResponse::from(&filing))))
}

/// Records the authority's decision
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ResolveFilingRequest>,
) -> Result<Json<ApiResponse<FilingResponse>>, ApiError> {
    let repo = state.filings();
    let mut filing = repo.get(FilingId::from(id)).await?;
    filing.resolve(request.approved, request.remarks)?;
    repo.update(&filing).await?;
    Ok(Json(ApiResponse::ok(FilingResponse::from(&filing))))
}
