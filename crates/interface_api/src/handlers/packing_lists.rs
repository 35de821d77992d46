//! Packing list handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{InvoiceId, OrderId, PackingListId, ProductId};
use domain_documents::{NumberScope, PackingList, PackingListItem};

use crate::dto::packing_list::{
    CreatePackingListRequest, PackingItemRequest, PackingListResponse, UpdatePackingListRequest,
};
use crate::dto::{ApiResponse, PageQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates a packing list for an order
pub async fn create_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<CreatePackingListRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PackingListResponse>>), ApiError> {
    request.validate()?;

    let order_id = OrderId::from(order_id);
    state.orders().get(order_id).await?;

    if let Some(invoice_id) = request.invoice_id {
        let invoice = state.invoices().get(InvoiceId::from(invoice_id)).await?;
        if invoice.order_id != order_id {
            return Err(ApiError::Validation(format!(
                "Invoice {} belongs to a different order",
                invoice.invoice_number
            )));
        }
    }

    let number = state.registry.next_number(NumberScope::PackingList).await?;
    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());
    let mut packing_list = PackingList::new(number, order_id, date)
        .with_items(build_items(&request.items));
    packing_list.invoice_id = request.invoice_id.map(InvoiceId::from);
    packing_list.shipping_marks = request.shipping_marks;
    packing_list.notes = request.notes;

    state.packing_lists().insert(&packing_list).await?;
    tracing::info!(packing_list = %packing_list.packing_list_number, "packing list created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(PackingListResponse::from(&packing_list))),
    ))
}

/// Lists packing lists, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<PackingListResponse>>>, ApiError> {
    let (limit, offset) = page.limit_offset();
    let repo = state.packing_lists();
    let packing_lists = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    let data = packing_lists.iter().map(PackingListResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, page.pagination(total))))
}

/// Gets a packing list by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PackingListResponse>>, ApiError> {
    let packing_list = state.packing_lists().get(PackingListId::from(id)).await?;
    Ok(Json(ApiResponse::ok(PackingListResponse::from(&packing_list))))
}

/// Updates a packing list's items, marks or notes
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePackingListRequest>,
) -> Result<Json<ApiResponse<PackingListResponse>>, ApiError> {
    let repo = state.packing_lists();
    let mut packing_list = repo.get(PackingListId::from(id)).await?;

    if let Some(items) = &request.items {
        packing_list.items = build_items(items);
    }
    if request.shipping_marks.is_some() {
        packing_list.shipping_marks = request.shipping_marks;
    }
    if request.notes.is_some() {
        packing_list.notes = request.notes;
    }
    packing_list.updated_at = Utc::now();

    repo.update(&packing_list).await?;
    Ok(Json(ApiResponse::ok(PackingListResponse::from(&packing_list))))
}

fn build_items(requests: &[PackingItemRequest]) -> Vec<PackingListItem> {
    requests
        .iter()
        .map(|request| {
            let mut item = PackingListItem::new(
                ProductId::from(request.product_id),
                request.quantity,
                request.packages,
                request.net_weight_kg,
                request.gross_weight_kg,
            );
            item.batch_number = request.batch_number.clone();
            item.expiry_date = request.expiry_date;
            item.dimensions = request.dimensions.clone();
            item
        })
        .collect()
}
