mod address;
mod categories;
mod checkout;
mod orders;
mod products;
mod profile;
pub mod webhooks;

pub use address::*;
pub use categories::*;
pub use checkout::*;
pub use orders::*;
pub use products::*;
pub use profile::*;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::customer_auth;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{order_id}", get(get_order))
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/address", post(add_address).get(list_addresses))
        .route(
            "/address/{address_id}",
            get(get_address).put(update_address).delete(delete_address),
        )
        .layer(from_fn_with_state(state.clone(), customer_auth));

    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/products/{product_id}", get(get_product))
        .route("/categories", get(list_categories))
        .route("/checkout", post(create_checkout))
        .route("/webhook/stripe", post(webhooks::handle_stripe_webhook))
        .merge(protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
