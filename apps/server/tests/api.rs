use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use chrono::{Duration, Utc};
use hivebook_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;

/// Router in single-user mode, no token needed.
async fn build_local_router(dir: &tempfile::TempDir) -> axum::Router {
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let config = Config::from_lookup(|key| match key {
        "HB_DB_PATH" => Some(db_path.clone()),
        _ => None,
    })
    .unwrap();
    let state = build_state(&config).await.unwrap();
    app_router(state, &config).unwrap()
}

async fn call(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn days_ago(days: i64) -> String {
    (Utc::now().date_naive() - Duration::days(days)).to_string()
}

#[tokio::test]
async fn dashboard_reports_window_totals() {
    let dir = tempdir().unwrap();
    let app = build_local_router(&dir).await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/harvests",
        Some(json!({ "harvestedOn": days_ago(2), "product": "HONEY", "amount": 12.5, "unit": "kg" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    call(
        &app,
        Method::POST,
        "/api/v1/incomes",
        Some(json!({ "receivedOn": days_ago(2), "amount": 40, "source": "Market" })),
    )
    .await;
    call(
        &app,
        Method::POST,
        "/api/v1/expenses",
        Some(json!({ "spentOn": days_ago(5), "amount": 15, "category": "Jars" })),
    )
    .await;
    // Outside the 30 day window.
    call(
        &app,
        Method::POST,
        "/api/v1/incomes",
        Some(json!({ "receivedOn": days_ago(100), "amount": 1000, "source": "Nucs" })),
    )
    .await;

    let (status, view) = call(&app, Method::GET, "/api/v1/dashboard?window=30d", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["window"], "30d");
    assert_eq!(view["series"]["granularity"], "day");
    assert_eq!(view["series"]["points"].as_array().unwrap().len(), 2);
    assert_eq!(view["totals"]["harvest"], 12.5);
    assert_eq!(view["totals"]["income"], 40.0);
    assert_eq!(view["totals"]["expenses"], 15.0);

    let (_, view) = call(&app, Method::GET, "/api/v1/dashboard?window=5y", None).await;
    assert_eq!(view["series"]["granularity"], "year");
    assert_eq!(view["totals"]["income"], 1040.0);

    let (status, body) = call(&app, Method::GET, "/api/v1/dashboard?window=2w", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn dashboard_sees_new_records_immediately() {
    let dir = tempdir().unwrap();
    let app = build_local_router(&dir).await;

    let (_, view) = call(&app, Method::GET, "/api/v1/dashboard", None).await;
    assert_eq!(view["totals"]["income"], 0.0);

    call(
        &app,
        Method::POST,
        "/api/v1/incomes",
        Some(json!({ "receivedOn": days_ago(1), "amount": 25, "source": "Market" })),
    )
    .await;

    let (_, view) = call(&app, Method::GET, "/api/v1/dashboard", None).await;
    assert_eq!(view["totals"]["income"], 25.0);
}

#[tokio::test]
async fn invoice_books_and_removes_its_income() {
    let dir = tempdir().unwrap();
    let app = build_local_router(&dir).await;
    let invoice = json!({
        "invoiceNumber": "2024-001",
        "customerName": "Farm stand",
        "issuedOn": days_ago(3),
        "items": [
            { "description": "1 lb jar", "quantity": 12, "unitPrice": 9.5 },
            { "description": "Comb honey", "quantity": 2, "unitPrice": 15 }
        ]
    });

    let (status, created) = call(&app, Method::POST, "/api/v1/invoices", Some(invoice.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["incomePending"], false);
    assert_eq!(created["total"], 144.0);
    let invoice_id = created["id"].as_str().unwrap().to_string();

    let (_, incomes) = call(&app, Method::GET, "/api/v1/incomes", None).await;
    let incomes = incomes.as_array().unwrap().clone();
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0]["invoiceId"], invoice_id.as_str());
    assert_eq!(incomes[0]["source"], "Invoice 2024-001");

    let (_, view) = call(&app, Method::GET, "/api/v1/dashboard", None).await;
    assert_eq!(view["totals"]["income"], 144.0);

    let (status, _) = call(&app, Method::POST, "/api/v1/invoices", Some(invoice)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, paid) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/invoices/{invoice_id}/status"),
        Some(json!({ "status": "PAID" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "PAID");

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/invoices/{invoice_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, incomes) = call(&app, Method::GET, "/api/v1/incomes", None).await;
    assert_eq!(incomes, json!([]));
    let (_, view) = call(&app, Method::GET, "/api/v1/dashboard", None).await;
    assert_eq!(view["totals"]["income"], 0.0);

    let (status, report) = call(&app, Method::POST, "/api/v1/invoices/reconcile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["repaired"], 0);
}

#[tokio::test]
async fn validation_and_missing_records() {
    let dir = tempdir().unwrap();
    let app = build_local_router(&dir).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/expenses",
        Some(json!({ "spentOn": days_ago(1), "amount": -3, "category": "Fuel" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = call(&app, Method::GET, "/api/v1/swarm-traps/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, "/api/v1/inventory/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::GET, "/api/v1/hives/missing/inspections", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
