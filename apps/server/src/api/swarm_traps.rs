use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use hivebook_core::swarm_traps::{NewSwarmTrap, SwarmTrap};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn list_traps(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<SwarmTrap>>> {
    Ok(Json(state.swarm_trap_service.list_traps(&user.id)?))
}

async fn get_trap(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<SwarmTrap>> {
    Ok(Json(state.swarm_trap_service.get_trap(&user.id, &id)?))
}

async fn create_trap(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewSwarmTrap>,
) -> ApiResult<Json<SwarmTrap>> {
    let created = state.swarm_trap_service.create_trap(&user.id, payload).await?;
    Ok(Json(created))
}

async fn update_trap(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewSwarmTrap>,
) -> ApiResult<Json<SwarmTrap>> {
    let updated = state.swarm_trap_service.update_trap(&user.id, &id, payload).await?;
    Ok(Json(updated))
}

async fn delete_trap(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.swarm_trap_service.delete_trap(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/swarm-traps", get(list_traps).post(create_trap))
        .route("/swarm-traps/{id}", get(get_trap).put(update_trap).delete(delete_trap))
}
