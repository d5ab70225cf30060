use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::Category;
use crate::state::AppState;

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.categories.list().await?;
    Ok(Json(categories))
}
