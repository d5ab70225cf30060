use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};

use crate::error::{AppError, Result};
use crate::payments::{self, PaymentEvent};
use crate::reconcile::ReconcileOutcome;
use crate::state::AppState;

/// Payment-processor webhook. The body arrives raw so the signature can be
/// verified over the exact delivered bytes. Unknown event types must be
/// acknowledged with a 2xx, since the processor retries on anything else.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    if let Some(secret) = &state.config.stripe_webhook_secret {
        let signature = headers
            .get("stripe-signature")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("missing stripe-signature header".to_string())
            })?;
        if !payments::verify_webhook_signature(secret, &body, signature)? {
            return Err(AppError::Unauthorized("invalid signature".to_string()));
        }
    }

    let event: PaymentEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid event payload: {}", e)))?;

    match state.reconciler.reconcile(&event).await? {
        ReconcileOutcome::Ignored => {
            tracing::debug!(event_type = %event.event_type, "event ignored");
        }
        ReconcileOutcome::Recorded { order, .. } => {
            tracing::info!(order_id = %order.order_id, "webhook processed");
        }
    }

    Ok(Json(json!({ "received": true })))
}
