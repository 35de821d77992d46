//! Purchase order handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ProductId, PurchaseOrderId, Rate};
use domain_documents::NumberScope;
use domain_orders::{PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus};

use crate::dto::purchase_order::{
    CreatePurchaseOrderRequest, PurchaseItemRequest, PurchaseOrderResponse,
    PurchaseOrderStatusRequest, UpdatePurchaseItemsRequest,
};
use crate::dto::{ApiResponse, PageQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates a purchase order, issuing its number from the PO sequence
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreatePurchaseOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PurchaseOrderResponse>>), ApiError> {
    request.validate()?;

    let items = resolve_items(&state, &request.items).await?;

    let po_number = state
        .registry
        .next_number(NumberScope::PurchaseOrder)
        .await?;
    let mut po = PurchaseOrder::new(
        po_number,
        request.supplier_name,
        request.ordered_at,
        request.currency,
        Rate::new(request.tax_rate),
    );
    po.supplier_address = request.supplier_address;
    po.set_items(items)?;

    state.purchase_orders().insert(&po).await?;
    tracing::info!(purchase_order = %po.po_number, "purchase order created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(PurchaseOrderResponse::from(&po))),
    ))
}

/// Lists purchase orders, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<PurchaseOrderResponse>>>, ApiError> {
    let (limit, offset) = page.limit_offset();
    let repo = state.purchase_orders();
    let purchase_orders = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    let data = purchase_orders
        .iter()
        .map(PurchaseOrderResponse::from)
        .collect();
    Ok(Json(ApiResponse::paginated(data, page.pagination(total))))
}

/// Gets a purchase order by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PurchaseOrderResponse>>, ApiError> {
    let po = state.purchase_orders().get(PurchaseOrderId::from(id)).await?;
    Ok(Json(ApiResponse::ok(PurchaseOrderResponse::from(&po))))
}

/// Replaces the purchase order's items and recalculates totals
pub async fn update_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePurchaseItemsRequest>,
) -> Result<Json<ApiResponse<PurchaseOrderResponse>>, ApiError> {
    request.validate()?;

    let repo = state.purchase_orders();
    let mut po = repo.get(PurchaseOrderId::from(id)).await?;
    let items = resolve_items(&state, &request.items).await?;
    po.set_items(items)?;

    repo.update(&po).await?;
    Ok(Json(ApiResponse::ok(PurchaseOrderResponse::from(&po))))
}

/// Moves a purchase order through its lifecycle
pub async fn transition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PurchaseOrderStatusRequest>,
) -> Result<Json<ApiResponse<PurchaseOrderResponse>>, ApiError> {
    let next: PurchaseOrderStatus = request.status.parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "Unknown purchase order status: {}",
            request.status
        ))
    })?;

    let repo = state.purchase_orders();
    let mut po = repo.get(PurchaseOrderId::from(id)).await?;
    po.transition_to(next)?;

    repo.update(&po).await?;
    Ok(Json(ApiResponse::ok(PurchaseOrderResponse::from(&po))))
}

async fn resolve_items(
    state: &AppState,
    requests: &[PurchaseItemRequest],
) -> Result<Vec<PurchaseOrderItem>, ApiError> {
    let products = state.products();
    let mut items = Vec::with_capacity(requests.len());
    for request in requests {
        let product_id = ProductId::from(request.product_id);
        products.find(product_id).await?.ok_or_else(|| {
            ApiError::Validation(format!("Unknown product: {}", request.product_id))
        })?;
        items.push(PurchaseOrderItem::new(
            product_id,
            request.quantity,
            request.unit_price,
        ));
    }
    Ok(items)
}
