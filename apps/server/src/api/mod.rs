use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{require_user, CurrentUser},
    config::Config,
    error::ApiResult,
    main_lib::AppState,
    models::UserProfile,
};

pub mod dashboard;
pub mod expenses;
pub mod harvests;
pub mod hives;
pub mod incomes;
pub mod inspections;
pub mod inventory;
pub mod invoices;
pub mod swarm_traps;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/api/v1/readyz",
    responses(
        (status = 200, description = "Ready"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match hivebook_storage_sqlite::ping(&state.pool) {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}

#[utoipa::path(get, path = "/api/v1/me", responses((status = 200, body = UserProfile)))]
async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResult<Json<UserProfile>> {
    Ok(Json(UserProfile::from(user)))
}

#[derive(OpenApi)]
#[openapi(
    paths(healthz, readyz, me, dashboard::get_dashboard),
    components(schemas(UserProfile)),
    tags((name = "hivebook"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{o}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let protected = Router::new()
        .route("/me", get(me))
        .merge(hives::router())
        .merge(inspections::router())
        .merge(harvests::router())
        .merge(swarm_traps::router())
        .merge(inventory::router())
        .merge(incomes::router())
        .merge(expenses::router())
        .merge(invoices::router())
        .merge(dashboard::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/openapi.json", get(move || async move { Json(openapi) }))
        .merge(protected);

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
