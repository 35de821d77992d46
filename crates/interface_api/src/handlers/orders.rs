//! Order handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{CustomerId, OrderId, ProductId};
use domain_documents::NumberScope;
use domain_orders::{Order, OrderItem, OrderStatus};

use crate::dto::order::{
    CreateOrderRequest, OrderItemRequest, OrderResponse, OrderStatusRequest,
    UpdateOrderItemsRequest,
};
use crate::dto::{ApiResponse, PageQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates an order, issuing its number from the ORD sequence
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), ApiError> {
    request.validate()?;

    let customer_id = CustomerId::from(request.customer_id);
    state.customers().get(customer_id).await?;

    let items = resolve_items(&state, &request.items).await?;

    let order_number = state.registry.next_number(NumberScope::Order).await?;
    let mut order = Order::new(order_number, customer_id, request.ordered_at, request.currency);
    order.notes = request.notes;
    order.set_items(items, &state.config.export_rates())?;

    state.orders().insert(&order).await?;
    tracing::info!(order = %order.order_number, "order created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(OrderResponse::from(&order))),
    ))
}

/// Lists orders, paginated, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    let (limit, offset) = page.limit_offset();
    let repo = state.orders();
    let orders = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    let data = orders.iter().map(OrderResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, page.pagination(total))))
}

/// Gets an order by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let order = state.orders().get(OrderId::from(id)).await?;
    Ok(Json(ApiResponse::ok(OrderResponse::from(&order))))
}

/// Replaces the order's items and recalculates the figure block
pub async fn update_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderItemsRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    request.validate()?;

    let repo = state.orders();
    let mut order = repo.get(OrderId::from(id)).await?;
    let items = resolve_items(&state, &request.items).await?;
    order.set_items(items, &state.config.export_rates())?;

    repo.update(&order).await?;
    Ok(Json(ApiResponse::ok(OrderResponse::from(&order))))
}

/// Moves an order through its lifecycle
pub async fn transition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<OrderStatusRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let next: OrderStatus = request
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown order status: {}", request.status)))?;

    let repo = state.orders();
    let mut order = repo.get(OrderId::from(id)).await?;
    match next {
        OrderStatus::Confirmed => order.confirm()?,
        OrderStatus::Cancelled => order.cancel()?,
        other => order.transition_to(other)?,
    }

    repo.update(&order).await?;
    Ok(Json(ApiResponse::ok(OrderResponse::from(&order))))
}

/// Turns item requests into order items, pricing from the catalogue when the
/// request carries no unit price
pub(crate) async fn resolve_items(
    state: &AppState,
    requests: &[OrderItemRequest],
) -> Result<Vec<OrderItem>, ApiError> {
    let products = state.products();
    let mut items = Vec::with_capacity(requests.len());
    for request in requests {
        let product_id = ProductId::from(request.product_id);
        let product = products.find(product_id).await?.ok_or_else(|| {
            ApiError::Validation(format!("Unknown product: {}", request.product_id))
        })?;

        let unit_price = request
            .unit_price
            .or(product.default_unit_price)
            .ok_or_else(|| {
                ApiError::Validation(format!(
                    "No unit price given and product {} has no catalogue price",
                    product.name
                ))
            })?;

        let mut item = OrderItem::new(product_id, request.quantity, unit_price);
        item.batch_number = request.batch_number.clone();
        item.expiry_date = request.expiry_date;
        items.push(item);
    }
    Ok(items)
}
