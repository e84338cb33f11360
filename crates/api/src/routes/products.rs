//! Product catalog endpoints.

use std::str::FromStr;

use application::{ApplicationError, ProductPatch, ProductQuery, StockAdjustment};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{CategoryId, Money, NewProduct, ProductCategory, ProductId};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::presenters::{ProductView, present_many};

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl CategoryRequest {
    fn into_category(self) -> Result<ProductCategory, ApplicationError> {
        Ok(ProductCategory::new(self.id, self.name, self.description)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub category: CategoryRequest,
    pub sku: String,
    pub stock_quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<CategoryRequest>,
}

#[derive(Debug, Deserialize)]
pub struct StockRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeParams {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<u32>,
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::from_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid product ID: {raw}")))
}

// -- Handlers --

/// GET /api/products lists every product, or one category with `?categoryId=`.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let Query(params) = params?;
    let category = params
        .category_id
        .filter(|id| !id.trim().is_empty())
        .map(CategoryId::new);

    let products = state
        .container
        .list_products()
        .execute(category.as_ref())
        .await?;
    Ok(Json(present_many(&products)))
}

/// POST /api/products creates a product.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductView>), ApiError> {
    let Json(req) = payload?;
    let category = req.category.into_category()?;
    let input = NewProduct::new(
        req.name,
        req.sku,
        Money::from_cents(req.price_cents),
        category,
        req.stock_quantity,
    )
    .with_description(req.description);

    let product = state.container.create_product().execute(input).await?;
    Ok((StatusCode::CREATED, Json(ProductView::from(&product))))
}

/// GET /api/products/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    let id = parse_product_id(&id)?;
    let product = state.container.get_product().execute(id).await?;
    Ok(Json(ProductView::from(&product)))
}

/// PUT /api/products/{id} applies the fields present in the body.
#[tracing::instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductView>, ApiError> {
    let id = parse_product_id(&id)?;
    let Json(req) = payload?;

    let patch = ProductPatch {
        name: req.name,
        description: req.description,
        price: req.price_cents.map(Money::from_cents),
        category: req.category.map(CategoryRequest::into_category).transpose()?,
    };

    let product = state.container.update_product().execute(id, patch).await?;
    Ok(Json(ProductView::from(&product)))
}

/// DELETE /api/products/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_product_id(&id)?;
    state.container.delete_product().execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn adjust_stock(
    state: AppState,
    id: &str,
    adjustment: StockAdjustment,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> Result<Json<ProductView>, ApiError> {
    let id = parse_product_id(id)?;
    let Json(req) = payload?;

    let product = state
        .container
        .adjust_stock()
        .execute(id, adjustment, req.quantity)
        .await?;
    Ok(Json(ProductView::from(&product)))
}

/// POST /api/products/{id}/stock/increase
#[tracing::instrument(skip(state, payload))]
pub async fn increase_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> Result<Json<ProductView>, ApiError> {
    adjust_stock(state, &id, StockAdjustment::Increase, payload).await
}

/// POST /api/products/{id}/stock/decrease
#[tracing::instrument(skip(state, payload))]
pub async fn decrease_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> Result<Json<ProductView>, ApiError> {
    adjust_stock(state, &id, StockAdjustment::Decrease, payload).await
}

/// GET /api/products/sku/{sku}
#[tracing::instrument(skip(state))]
pub async fn by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    let product = state
        .container
        .search_products()
        .execute(ProductQuery::BySku(sku))
        .await?
        .into_iter()
        .next()
        .ok_or(ApplicationError::ProductNotFound)?;
    Ok(Json(ProductView::from(&product)))
}

/// GET /api/products/search?minPrice=&maxPrice= with bounds in cents.
#[tracing::instrument(skip(state))]
pub async fn search_by_price(
    State(state): State<AppState>,
    params: Result<Query<PriceRangeParams>, QueryRejection>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let Query(params) = params?;
    let query = ProductQuery::ByPriceRange {
        min: Money::from_cents(params.min_price.unwrap_or(0)),
        max: Money::from_cents(params.max_price.unwrap_or(i64::MAX)),
    };

    let products = state.container.search_products().execute(query).await?;
    Ok(Json(present_many(&products)))
}

/// GET /api/products/out-of-stock
#[tracing::instrument(skip(state))]
pub async fn out_of_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let products = state
        .container
        .search_products()
        .execute(ProductQuery::OutOfStock)
        .await?;
    Ok(Json(present_many(&products)))
}

/// GET /api/products/low-stock?threshold= falls back to the configured threshold.
#[tracing::instrument(skip(state))]
pub async fn low_stock(
    State(state): State<AppState>,
    params: Result<Query<LowStockParams>, QueryRejection>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let Query(params) = params?;
    let threshold = params.threshold.unwrap_or(state.low_stock_threshold);

    let products = state
        .container
        .search_products()
        .execute(ProductQuery::LowStock { threshold })
        .await?;
    Ok(Json(present_many(&products)))
}
