//! Product handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::ProductId;
use domain_orders::Product;

use crate::dto::product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::dto::{ApiResponse, PageQuery};
use crate::error::ApiError;
use crate::AppState;

/// Creates a product
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), ApiError> {
    request.validate()?;

    let mut product = Product::new(request.name, request.unit)?;
    product.hsn_code = request.hsn_code;
    product.dosage_form = request.dosage_form;
    product.strength = request.strength;
    product.default_unit_price = request.default_unit_price;

    state.products().insert(&product).await?;
    tracing::info!(product = %product.id, "product created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ProductResponse::from(&product))),
    ))
}

/// Lists products, paginated
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ApiError> {
    let (limit, offset) = page.limit_offset();
    let repo = state.products();
    let products = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    let data = products.iter().map(ProductResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, page.pagination(total))))
}

/// Gets a product by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    let product = state.products().get(ProductId::from(id)).await?;
    Ok(Json(ApiResponse::ok(ProductResponse::from(&product))))
}

/// Updates a product; absent fields keep their stored value
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, ApiError> {
    request.validate()?;

    let repo = state.products();
    let mut product = repo.get(ProductId::from(id)).await?;

    if let Some(name) = request.name {
        product.name = name;
    }
    if let Some(unit) = request.unit {
        product.unit = unit;
    }
    if request.hsn_code.is_some() {
        product.hsn_code = request.hsn_code;
    }
    if request.dosage_form.is_some() {
        product.dosage_form = request.dosage_form;
    }
    if request.strength.is_some() {
        product.strength = request.strength;
    }
    if request.default_unit_price.is_some() {
        product.default_unit_price = request.default_unit_price;
    }
    product.updated_at = Utc::now();

    repo.update(&product).await?;
    Ok(Json(ApiResponse::ok(ProductResponse::from(&product))))
}

/// Deletes a product
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.products().delete(ProductId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
