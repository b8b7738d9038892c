use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
};
use hivebook_server::{api::app_router, auth::Claims, build_state, config::Config};
use jsonwebtoken::{encode, EncodingKey, Header};
use tempfile::tempdir;
use tower::ServiceExt;

const SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

async fn build_test_router(dir: &tempfile::TempDir) -> axum::Router {
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let config = Config::from_lookup(|key| match key {
        "HB_DB_PATH" => Some(db_path.clone()),
        "HB_AUTH_SECRET" => Some(SECRET.to_string()),
        _ => None,
    })
    .unwrap();
    let state = build_state(&config).await.unwrap();
    app_router(state, &config).unwrap()
}

fn token(sub: &str, name: Option<&str>) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        email: None,
        name: name.map(str::to_string),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(t) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_routes_are_public() {
    let dir = tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let response = app.clone().oneshot(get("/api/v1/healthz", None)).await.unwrap();
    assert_eq!(response.status(), 200);

    let response = app.clone().oneshot(get("/api/v1/readyz", None)).await.unwrap();
    assert_eq!(response.status(), 200);

    let response = app.oneshot(get("/api/v1/openapi.json", None)).await.unwrap();
    assert_eq!(response.status(), 200);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/v1/dashboard"].is_object());
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let dir = tempdir().unwrap();
    let app = build_test_router(&dir).await;

    let response = app.clone().oneshot(get("/api/v1/me", None)).await.unwrap();
    assert_eq!(response.status(), 401);
    let body = json_body(response).await;
    assert_eq!(body["code"], 401);

    let response = app
        .clone()
        .oneshot(get("/api/v1/hives", Some("garbage")))
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = app
        .oneshot(get("/api/v1/me", Some(&token("auth0|keeper", Some("Ada")))))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let me = json_body(response).await;
    assert_eq!(me["externalId"], "auth0|keeper");
    assert_eq!(me["displayName"], "Ada");
}

#[tokio::test]
async fn users_only_see_their_own_records() {
    let dir = tempdir().unwrap();
    let app = build_test_router(&dir).await;
    let alice = token("auth0|alice", None);
    let bob = token("auth0|bob", None);

    let create = Request::builder()
        .method("POST")
        .uri("/api/v1/hives")
        .header(header::AUTHORIZATION, format!("Bearer {alice}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "name": "Hive 1", "hiveType": "Langstroth" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), 200);
    let hive = json_body(response).await;
    let hive_id = hive["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get("/api/v1/hives", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, serde_json::json!([]));

    let response = app
        .clone()
        .oneshot(get(&format!("/api/v1/hives/{hive_id}"), Some(&bob)))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = app
        .oneshot(get(&format!("/api/v1/hives/{hive_id}"), Some(&alice)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
