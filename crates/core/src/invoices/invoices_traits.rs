use async_trait::async_trait;

use super::invoices_model::{
    CreatedInvoice, Invoice, InvoiceStatus, NewInvoice, ReconcileReport,
};
use crate::errors::Result;

#[async_trait]
pub trait InvoiceRepositoryTrait: Send + Sync {
    /// Newest first, items included.
    fn list(&self, user_id: &str) -> Result<Vec<Invoice>>;
    fn get_by_id(&self, user_id: &str, invoice_id: &str) -> Result<Invoice>;
    /// Inserts the invoice and its items. The total is computed from the items.
    async fn create(&self, user_id: &str, new_invoice: NewInvoice) -> Result<Invoice>;
    async fn set_income(
        &self,
        user_id: &str,
        invoice_id: &str,
        income_id: Option<String>,
    ) -> Result<Invoice>;
    async fn update_status(
        &self,
        user_id: &str,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<Invoice>;
    /// Deletes the invoice and its items, returning the number of invoices removed.
    async fn delete(&self, user_id: &str, invoice_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait InvoiceServiceTrait: Send + Sync {
    fn list_invoices(&self, user_id: &str) -> Result<Vec<Invoice>>;
    fn get_invoice(&self, user_id: &str, invoice_id: &str) -> Result<Invoice>;
    /// Creates the invoice and books its income.
    async fn create_invoice(&self, user_id: &str, new_invoice: NewInvoice)
        -> Result<CreatedInvoice>;
    async fn update_status(
        &self,
        user_id: &str,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<Invoice>;
    /// Deletes the invoice together with its income.
    async fn delete_invoice(&self, user_id: &str, invoice_id: &str) -> Result<()>;
    /// Books incomes for every invoice that has none.
    async fn reconcile_invoices(&self, user_id: &str) -> Result<ReconcileReport>;
}
