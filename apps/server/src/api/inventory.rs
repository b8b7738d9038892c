use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::inventory::{InventoryItem, NewInventoryItem};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn list_items(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.inventory_service.list_items(&user.id)?))
}

async fn get_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<InventoryItem>> {
    Ok(Json(state.inventory_service.get_item(&user.id, &id)?))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewInventoryItem>,
) -> ApiResult<Json<InventoryItem>> {
    let created = state.inventory_service.create_item(&user.id, payload).await?;
    Ok(Json(created))
}

async fn update_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewInventoryItem>,
) -> ApiResult<Json<InventoryItem>> {
    let updated = state.inventory_service.update_item(&user.id, &id, payload).await?;
    Ok(Json(updated))
}

async fn delete_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.inventory_service.delete_item(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/inventory", get(list_items).post(create_item))
        .route("/inventory/{id}", get(get_item).put(update_item).delete(delete_item))
}
