use axum::{
    extract::State,
    response::Redirect,
    Json,
};
use serde::Deserialize;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(rename = "priceId")]
    pub price_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub success_url: String,
    pub cancel_url: String,
}

fn default_quantity() -> i64 {
    1
}

/// Create a checkout session on the processor and send the client to its
/// hosted payment page (303, so the browser re-issues as GET).
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Redirect> {
    let session = state
        .processor
        .create_checkout_session(
            &request.price_id,
            request.quantity,
            &request.success_url,
            &request.cancel_url,
        )
        .await?;

    tracing::info!(session_id = %session.id, "checkout session created");
    Ok(Redirect::to(&session.url))
}
