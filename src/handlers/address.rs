use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Address, AddressInput, Customer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub address: AddressInput,
}

#[derive(Debug, Serialize)]
pub struct AddressesResponse {
    pub addresses: Vec<Address>,
}

async fn load_customer(state: &AppState, customer_id: &str) -> Result<Customer> {
    state
        .customers
        .get(customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}

pub async fn add_address(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<AddressRequest>,
) -> Result<Json<AddressesResponse>> {
    let mut customer = load_customer(&state, &user.sub).await?;
    customer
        .addresses
        .push(request.address.into_address(uuid::Uuid::new_v4().to_string()));

    let updated = state
        .customers
        .update_addresses(&user.sub, customer.addresses)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(AddressesResponse {
        addresses: updated.addresses,
    }))
}

pub async fn list_addresses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AddressesResponse>> {
    let customer = load_customer(&state, &user.sub).await?;
    Ok(Json(AddressesResponse {
        addresses: customer.addresses,
    }))
}

pub async fn get_address(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(address_id): Path<String>,
) -> Result<Json<Address>> {
    let customer = load_customer(&state, &user.sub).await?;
    let address = customer
        .addresses
        .into_iter()
        .find(|a| a.address_id == address_id)
        .ok_or_else(|| AppError::NotFound("Address not found".to_string()))?;
    Ok(Json(address))
}

pub async fn update_address(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(address_id): Path<String>,
    Json(request): Json<AddressRequest>,
) -> Result<Json<AddressesResponse>> {
    let mut customer = load_customer(&state, &user.sub).await?;
    let address = customer
        .addresses
        .iter_mut()
        .find(|a| a.address_id == address_id)
        .ok_or_else(|| AppError::NotFound("Address not found".to_string()))?;
    request.address.merge_into(address);

    let updated = state
        .customers
        .update_addresses(&user.sub, customer.addresses)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(AddressesResponse {
        addresses: updated.addresses,
    }))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(address_id): Path<String>,
) -> Result<Json<AddressesResponse>> {
    let mut customer = load_customer(&state, &user.sub).await?;
    customer.addresses.retain(|a| a.address_id != address_id);

    let updated = state
        .customers
        .update_addresses(&user.sub, customer.addresses)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(AddressesResponse {
        addresses: updated.addresses,
    }))
}
