use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::inspections::{Inspection, NewInspection};

use crate::{
    auth::CurrentUser, error::ApiResult, main_lib::AppState, models::InspectionQuery,
};

async fn list_inspections(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<InspectionQuery>,
) -> ApiResult<Json<Vec<Inspection>>> {
    let inspections = state
        .inspection_service
        .list_inspections(&user.id, query.hive_id.as_deref())?;
    Ok(Json(inspections))
}

async fn get_inspection(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Inspection>> {
    Ok(Json(state.inspection_service.get_inspection(&user.id, &id)?))
}

async fn create_inspection(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(inspection): Json<NewInspection>,
) -> ApiResult<Json<Inspection>> {
    let created = state
        .inspection_service
        .create_inspection(&user.id, inspection)
        .await?;
    Ok(Json(created))
}

async fn update_inspection(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(inspection): Json<NewInspection>,
) -> ApiResult<Json<Inspection>> {
    let updated = state
        .inspection_service
        .update_inspection(&user.id, &id, inspection)
        .await?;
    Ok(Json(updated))
}

async fn delete_inspection(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state
        .inspection_service
        .delete_inspection(&user.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/inspections", get(list_inspections).post(create_inspection))
        .route(
            "/inspections/{id}",
            get(get_inspection)
                .put(update_inspection)
                .delete(delete_inspection),
        )
}
