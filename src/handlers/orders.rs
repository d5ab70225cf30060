use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::Order;
use crate::state::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Order>>> {
    let orders = state.orders.list_by_owner(&user.sub).await?;
    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>> {
    let order = state
        .orders
        .get(&order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    if order.owner_id != user.sub {
        return Err(AppError::Forbidden(
            "You do not have access to this order".to_string(),
        ));
    }

    Ok(Json(order))
}
