use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use hivebook_core::invoices::{CreatedInvoice, Invoice, NewInvoice, ReconcileReport};

use crate::{
    auth::CurrentUser, error::ApiResult, main_lib::AppState, models::InvoiceStatusUpdate,
};

async fn list_invoices(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Invoice>>> {
    Ok(Json(state.invoice_service.list_invoices(&user.id)?))
}

async fn get_invoice(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Invoice>> {
    Ok(Json(state.invoice_service.get_invoice(&user.id, &id)?))
}

/// Creates the invoice and books its income. `incomePending` is set when
/// the income is left for reconciliation.
async fn create_invoice(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(invoice): Json<NewInvoice>,
) -> ApiResult<Json<CreatedInvoice>> {
    let created = state
        .invoice_service
        .create_invoice(&user.id, invoice)
        .await?;
    Ok(Json(created))
}

async fn update_invoice_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(update): Json<InvoiceStatusUpdate>,
) -> ApiResult<Json<Invoice>> {
    let invoice = state
        .invoice_service
        .update_status(&user.id, &id, update.status)
        .await?;
    Ok(Json(invoice))
}

async fn delete_invoice(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    state.invoice_service.delete_invoice(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reconcile_invoices(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<ReconcileReport>> {
    let report = state.invoice_service.reconcile_invoices(&user.id).await?;
    if !report.failed.is_empty() {
        tracing::warn!(
            "{} invoices still have no income after reconciliation",
            report.failed.len()
        );
    }
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/reconcile", post(reconcile_invoices))
        .route("/invoices/{id}", get(get_invoice).delete(delete_invoice))
        .route("/invoices/{id}/status", put(update_invoice_status))
}
