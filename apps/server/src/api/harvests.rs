use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::harvests::{Harvest, NewHarvest};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn list_harvests(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Harvest>>> {
    Ok(Json(state.harvest_service.list_harvests(&user.id)?))
}

async fn get_harvest(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Harvest>> {
    Ok(Json(state.harvest_service.get_harvest(&user.id, &id)?))
}

async fn create_harvest(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewHarvest>,
) -> ApiResult<Json<Harvest>> {
    let created = state.harvest_service.create_harvest(&user.id, payload).await?;
    Ok(Json(created))
}

async fn update_harvest(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewHarvest>,
) -> ApiResult<Json<Harvest>> {
    let updated = state.harvest_service.update_harvest(&user.id, &id, payload).await?;
    Ok(Json(updated))
}

async fn delete_harvest(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.harvest_service.delete_harvest(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/harvests", get(list_harvests).post(create_harvest))
        .route("/harvests/{id}", get(get_harvest).put(update_harvest).delete(delete_harvest))
}
