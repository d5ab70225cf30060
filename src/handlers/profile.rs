use axum::{extract::State, Extension, Json};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{AddressInput, Customer};
use crate::state::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Customer>> {
    let customer = state
        .customers
        .get(&user.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(customer))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Appended to the address book when present
    #[serde(default)]
    pub address: Option<AddressInput>,
}

/// Update the customer record, then propagate name/phone to the identity
/// provider so the user pool stays consistent.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Customer>> {
    let mut customer = state
        .customers
        .get(&user.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    if let Some(name) = request.name.clone() {
        customer.name = name;
    }
    if let Some(email) = request.email {
        customer.email = email;
    }
    if request.phone.is_some() {
        customer.phone = request.phone.clone();
    }
    if let Some(address) = request.address {
        customer
            .addresses
            .push(address.into_address(uuid::Uuid::new_v4().to_string()));
    }
    customer.updated_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    state.customers.put(customer.clone()).await?;

    state
        .identity
        .update_user_attributes(
            &user.sub,
            request.name.as_deref(),
            request.phone.as_deref(),
        )
        .await?;

    Ok(Json(customer))
}
