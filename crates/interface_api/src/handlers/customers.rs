//! Customer handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::CustomerId;
use domain_orders::Customer;

use crate::dto::customer::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::dto::order::OrderResponse;
use crate::dto::{ApiResponse, PageQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates a customer
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponse>>), ApiError> {
    request.validate()?;

    let mut customer = Customer::new(request.name, request.address, request.country)?;
    customer.city = request.city;
    customer.email = request.email;
    customer.phone = request.phone;
    customer.tax_id = request.tax_id;

    state.customers().insert(&customer).await?;
    tracing::info!(customer = %customer.id, "customer created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CustomerResponse::from(&customer))),
    ))
}

/// Lists customers, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<CustomerResponse>>>, ApiError> {
    let (limit, offset) = page.limit_offset();
    let repo = state.customers();
    let customers = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    let data = customers.iter().map(CustomerResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, page.pagination(total))))
}

/// Gets a customer by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerResponse>>, ApiError> {
    let customer = state.customers().get(CustomerId::from(id)).await?;
    Ok(Json(ApiResponse::ok(CustomerResponse::from(&customer))))
}

/// Updates a customer; absent fields keep their stored value
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, ApiError> {
    request.validate()?;

    let repo = state.customers();
    let mut customer = repo.get(CustomerId::from(id)).await?;

    if let Some(name) = request.name {
        customer.name = name;
    }
    if let Some(address) = request.address {
        customer.address = address;
    }
    if let Some(country) = request.country {
        customer.country = country;
    }
    if request.city.is_some() {
        customer.city = request.city;
    }
    if request.email.is_some() {
        customer.email = request.email;
    }
    if request.phone.is_some() {
        customer.phone = request.phone;
    }
    if request.tax_id.is_some() {
        customer.tax_id = request.tax_id;
    }
    customer.updated_at = Utc::now();

    repo.update(&customer).await?;
    Ok(Json(ApiResponse::ok(CustomerResponse::from(&customer))))
}

/// Deletes a customer
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.customers().delete(CustomerId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists a customer's orders
pub async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    let customer_id = CustomerId::from(id);
    // 404 for an unknown customer rather than an empty list
    state.customers().get(customer_id).await?;
    let orders = state.orders().list_by_customer(customer_id).await?;
    Ok(Json(ApiResponse::ok(
        orders.iter().map(OrderResponse::from).collect(),
    )))
}
