use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::expenses::{Expense, NewExpense};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Expense>>> {
    Ok(Json(state.expense_service.list_expenses(&user.id)?))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Expense>> {
    Ok(Json(state.expense_service.get_expense(&user.id, &id)?))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewExpense>,
) -> ApiResult<Json<Expense>> {
    let created = state.expense_service.create_expense(&user.id, payload).await?;
    Ok(Json(created))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewExpense>,
) -> ApiResult<Json<Expense>> {
    let updated = state.expense_service.update_expense(&user.id, &id, payload).await?;
    Ok(Json(updated))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.expense_service.delete_expense(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", get(get_expense).put(update_expense).delete(delete_expense))
}
