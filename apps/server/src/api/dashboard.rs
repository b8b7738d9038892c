use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::dashboard::{DashboardView, Window};
use hivebook_core::Error as CoreError;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::DashboardQuery};

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Chart series, window totals and data-quality diagnostics"),
        (status = 400, description = "Unknown window key")
    )
)]
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardView>> {
    let window = match query.window.as_deref() {
        Some(key) => key.parse::<Window>().map_err(CoreError::from)?,
        None => Window::default(),
    };
    let view = state.dashboard_service.get_dashboard(&user.id, window)?;
    Ok(Json(view))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
