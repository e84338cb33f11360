//! Customer endpoints.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{CustomerId, NewCustomer};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::presenters::CustomerView;

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

fn parse_customer_id(raw: &str) -> Result<CustomerId, ApiError> {
    CustomerId::from_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("Invalid customer ID: {raw}")))
}

/// POST /api/customers registers a customer.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomerView>), ApiError> {
    let Json(req) = payload?;
    let input = NewCustomer {
        name: req.name,
        email: req.email,
        address: req.address,
        password: req.password,
    };

    let customer = state.container.create_customer().execute(input).await?;
    Ok((StatusCode::CREATED, Json(CustomerView::from(&customer))))
}

/// GET /api/customers/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerView>, ApiError> {
    let id = parse_customer_id(&id)?;
    let customer = state.container.get_customer().execute(id).await?;
    Ok(Json(CustomerView::from(&customer)))
}

/// PUT /api/customers/{id} changes name and/or address.
#[tracing::instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<CustomerView>, ApiError> {
    let id = parse_customer_id(&id)?;
    let Json(req) = payload?;

    let customer = state
        .container
        .update_customer_profile()
        .execute(id, req.name, req.address)
        .await?;
    Ok(Json(CustomerView::from(&customer)))
}

/// DELETE /api/customers/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_customer_id(&id)?;
    state.container.delete_customer().execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
