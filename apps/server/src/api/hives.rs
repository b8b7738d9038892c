use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::hives::{Hive, NewHive};
use hivebook_core::inspections::Inspection;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn list_hives(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Hive>>> {
    Ok(Json(state.hive_service.list_hives(&user.id)?))
}

async fn get_hive(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Hive>> {
    Ok(Json(state.hive_service.get_hive(&user.id, &id)?))
}

async fn create_hive(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(hive): Json<NewHive>,
) -> ApiResult<Json<Hive>> {
    let h = state.hive_service.create_hive(&user.id, hive).await?;
    Ok(Json(h))
}

async fn update_hive(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(hive): Json<NewHive>,
) -> ApiResult<Json<Hive>> {
    let h = state.hive_service.update_hive(&user.id, &id, hive).await?;
    Ok(Json(h))
}

async fn delete_hive(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.hive_service.delete_hive(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Inspections of one hive, newest first.
async fn list_hive_inspections(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Inspection>>> {
    // Unknown or foreign hives answer 404 rather than an empty list.
    state.hive_service.get_hive(&user.id, &id)?;
    let inspections = state
        .inspection_service
        .list_inspections(&user.id, Some(&id))?;
    Ok(Json(inspections))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hives", get(list_hives).post(create_hive))
        .route(
            "/hives/{id}",
            get(get_hive).put(update_hive).delete(delete_hive),
        )
        .route("/hives/{id}/inspections", get(list_hive_inspections))
}
