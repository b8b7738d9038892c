use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::incomes::{Income, NewIncome};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn list_incomes(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Income>>> {
    Ok(Json(state.income_service.list_incomes(&user.id)?))
}

async fn get_income(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Income>> {
    Ok(Json(state.income_service.get_income(&user.id, &id)?))
}

async fn create_income(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewIncome>,
) -> ApiResult<Json<Income>> {
    let created = state.income_service.create_income(&user.id, payload).await?;
    Ok(Json(created))
}

async fn update_income(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewIncome>,
) -> ApiResult<Json<Income>> {
    let updated = state.income_service.update_income(&user.id, &id, payload).await?;
    Ok(Json(updated))
}

async fn delete_income(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.income_service.delete_income(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/incomes", get(list_incomes).post(create_income))
        .route("/incomes/{id}", get(get_income).put(update_income).delete(delete_income))
}
