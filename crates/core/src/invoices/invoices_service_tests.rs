use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DomainEvent, MockDomainEventSink};
use crate::incomes::{Income, IncomeRepositoryTrait, NewIncome};
use crate::utils::now_naive;

fn db_down() -> Error {
    Error::Database(DatabaseError::QueryFailed("database is locked".to_string()))
}

#[derive(Default)]
struct MockInvoiceRepository {
    invoices: Mutex<Vec<Invoice>>,
    fail_delete: AtomicBool,
    fail_link: AtomicBool,
}

#[async_trait]
impl InvoiceRepositoryTrait for MockInvoiceRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Invoice>> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_by_id(&self, user_id: &str, invoice_id: &str) -> Result<Invoice> {
        self.list(user_id)?
            .into_iter()
            .find(|i| i.id == invoice_id)
            .ok_or_else(|| Error::not_found("Invoice", invoice_id))
    }

    async fn create(&self, user_id: &str, new_invoice: NewInvoice) -> Result<Invoice> {
        let mut invoices = self.invoices.lock().unwrap();
        let invoice = Invoice {
            id: format!("inv-{}", invoices.len() + 1),
            user_id: user_id.to_string(),
            total: new_invoice.total(),
            invoice_number: new_invoice.invoice_number,
            customer_name: new_invoice.customer_name,
            customer_email: new_invoice.customer_email,
            issued_on: new_invoice.issued_on,
            due_on: new_invoice.due_on,
            items: new_invoice.items,
            status: new_invoice.status,
            income_id: None,
            notes: new_invoice.notes,
            created_at: now_naive(),
            updated_at: now_naive(),
        };
        invoices.push(invoice.clone());
        Ok(invoice)
    }

    async fn set_income(
        &self,
        user_id: &str,
        invoice_id: &str,
        income_id: Option<String>,
    ) -> Result<Invoice> {
        if self.fail_link.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut invoices = self.invoices.lock().unwrap();
        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == invoice_id && i.user_id == user_id)
            .ok_or_else(|| Error::not_found("Invoice", invoice_id))?;
        invoice.income_id = income_id;
        Ok(invoice.clone())
    }

    async fn update_status(
        &self,
        user_id: &str,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<Invoice> {
        let mut invoices = self.invoices.lock().unwrap();
        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == invoice_id && i.user_id == user_id)
            .ok_or_else(|| Error::not_found("Invoice", invoice_id))?;
        invoice.status = status;
        Ok(invoice.clone())
    }

    async fn delete(&self, user_id: &str, invoice_id: &str) -> Result<usize> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut invoices = self.invoices.lock().unwrap();
        let before = invoices.len();
        invoices.retain(|i| !(i.id == invoice_id && i.user_id == user_id));
        Ok(before - invoices.len())
    }
}

#[derive(Default)]
struct MockIncomeRepository {
    incomes: Mutex<Vec<Income>>,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
}

#[async_trait]
impl IncomeRepositoryTrait for MockIncomeRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Income>> {
        Ok(self
            .incomes
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_by_id(&self, user_id: &str, income_id: &str) -> Result<Income> {
        self.list(user_id)?
            .into_iter()
            .find(|i| i.id == income_id)
            .ok_or_else(|| Error::not_found("Income", income_id))
    }

    async fn create(&self, user_id: &str, new_income: NewIncome) -> Result<Income> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut incomes = self.incomes.lock().unwrap();
        let income = Income {
            id: format!("inc-{}", incomes.len() + 1),
            user_id: user_id.to_string(),
            received_on: new_income.received_on,
            amount: new_income.amount,
            source: new_income.source,
            description: new_income.description,
            invoice_id: new_income.invoice_id,
            created_at: now_naive(),
            updated_at: now_naive(),
        };
        incomes.push(income.clone());
        Ok(income)
    }

    async fn update(&self, _user_id: &str, income_id: &str, _changes: NewIncome) -> Result<Income> {
        Err(Error::not_found("Income", income_id))
    }

    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut incomes = self.incomes.lock().unwrap();
        let before = incomes.len();
        incomes.retain(|i| !(i.id == income_id && i.user_id == user_id));
        Ok(before - incomes.len())
    }

    async fn delete_by_invoice(&self, user_id: &str, invoice_id: &str) -> Result<usize> {
        let mut incomes = self.incomes.lock().unwrap();
        let before = incomes.len();
        incomes.retain(|i| !(i.invoice_id.as_deref() == Some(invoice_id) && i.user_id == user_id));
        Ok(before - incomes.len())
    }
}

struct Fixture {
    invoices: Arc<MockInvoiceRepository>,
    incomes: Arc<MockIncomeRepository>,
    sink: Arc<MockDomainEventSink>,
    service: InvoiceService,
}

fn fixture(policy: InvoiceIncomePolicy) -> Fixture {
    let invoices = Arc::new(MockInvoiceRepository::default());
    let incomes = Arc::new(MockIncomeRepository::default());
    let sink = Arc::new(MockDomainEventSink::new());
    let service = InvoiceService::new(invoices.clone(), incomes.clone(), sink.clone(), policy);
    Fixture {
        invoices,
        incomes,
        sink,
        service,
    }
}

fn honey_invoice() -> NewInvoice {
    NewInvoice {
        invoice_number: "2024-014".to_string(),
        customer_name: "Corner bakery".to_string(),
        customer_email: Some("orders@bakery.test".to_string()),
        issued_on: NaiveDate::from_ymd_opt(2024, 9, 12).unwrap(),
        due_on: NaiveDate::from_ymd_opt(2024, 10, 12),
        items: vec![
            InvoiceItem {
                description: "Wildflower honey, 1 lb".to_string(),
                quantity: dec!(24),
                unit_price: dec!(9),
            },
            InvoiceItem {
                description: "Comb honey".to_string(),
                quantity: dec!(4),
                unit_price: dec!(14.5),
            },
        ],
        status: InvoiceStatus::Sent,
        notes: None,
    }
}

#[tokio::test]
async fn test_create_books_linked_income() {
    let f = fixture(InvoiceIncomePolicy::Compensate);

    let created = f.service.create_invoice("u1", honey_invoice()).await.unwrap();

    assert!(!created.income_pending);
    assert_eq!(created.invoice.total, dec!(274));
    let incomes = f.incomes.list("u1").unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(created.invoice.income_id.as_deref(), Some(incomes[0].id.as_str()));
    assert_eq!(incomes[0].amount, dec!(274));
    assert_eq!(incomes[0].received_on, created.invoice.issued_on);
    assert_eq!(incomes[0].source, "Invoice 2024-014");
    assert_eq!(incomes[0].invoice_id.as_deref(), Some(created.invoice.id.as_str()));
    assert!(f
        .sink
        .events()
        .contains(&DomainEvent::incomes_changed("u1")));
}

#[tokio::test]
async fn test_compensate_removes_invoice_on_income_failure() {
    let f = fixture(InvoiceIncomePolicy::Compensate);
    f.incomes.fail_create.store(true, Ordering::SeqCst);

    let err = f.service.create_invoice("u1", honey_invoice()).await.unwrap_err();

    assert!(matches!(err, Error::Database(_)));
    assert!(f.invoices.list("u1").unwrap().is_empty());
    assert!(f.sink.events().is_empty());
}

#[tokio::test]
async fn test_failed_compensation_is_reported() {
    let f = fixture(InvoiceIncomePolicy::Compensate);
    f.incomes.fail_create.store(true, Ordering::SeqCst);
    f.invoices.fail_delete.store(true, Ordering::SeqCst);

    let err = f.service.create_invoice("u1", honey_invoice()).await.unwrap_err();

    assert!(matches!(err, Error::Saga(_)));
    assert!(err.to_string().contains("could not be removed"));
}

#[tokio::test]
async fn test_failed_link_removes_the_new_income() {
    let f = fixture(InvoiceIncomePolicy::Compensate);
    f.invoices.fail_link.store(true, Ordering::SeqCst);

    let err = f.service.create_invoice("u1", honey_invoice()).await.unwrap_err();

    assert!(matches!(err, Error::Database(_)));
    assert!(f.invoices.list("u1").unwrap().is_empty());
    assert!(f.incomes.list("u1").unwrap().is_empty());
}

#[tokio::test]
async fn test_unremovable_income_keeps_invoice_for_reconcile() {
    let f = fixture(InvoiceIncomePolicy::Compensate);
    f.invoices.fail_link.store(true, Ordering::SeqCst);
    f.incomes.fail_delete.store(true, Ordering::SeqCst);

    let err = f.service.create_invoice("u1", honey_invoice()).await.unwrap_err();

    assert!(matches!(err, Error::Saga(_)));
    assert!(err.to_string().contains("income inc-1"));
    let invoices = f.invoices.list("u1").unwrap();
    assert_eq!(invoices.len(), 1);
    assert!(invoices[0].income_id.is_none());
    assert_eq!(f.incomes.list("u1").unwrap().len(), 1);
    assert!(f
        .sink
        .events()
        .contains(&DomainEvent::incomes_changed("u1")));

    f.invoices.fail_link.store(false, Ordering::SeqCst);
    f.incomes.fail_delete.store(false, Ordering::SeqCst);
    let report = f.service.reconcile_invoices("u1").await.unwrap();

    assert_eq!(report.repaired, 1);
    let incomes = f.incomes.list("u1").unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(
        f.service.get_invoice("u1", &invoices[0].id).unwrap().income_id,
        Some(incomes[0].id.clone())
    );
}

#[tokio::test]
async fn test_reconcile_policy_keeps_pending_invoice_and_repairs_later() {
    let f = fixture(InvoiceIncomePolicy::Reconcile);
    f.incomes.fail_create.store(true, Ordering::SeqCst);

    let created = f.service.create_invoice("u1", honey_invoice()).await.unwrap();
    assert!(created.income_pending);
    assert!(created.invoice.income_id.is_none());
    assert_eq!(f.invoices.list("u1").unwrap().len(), 1);

    f.incomes.fail_create.store(false, Ordering::SeqCst);
    let report = f.service.reconcile_invoices("u1").await.unwrap();

    assert_eq!(report.repaired, 1);
    assert!(report.failed.is_empty());
    let invoice = f.service.get_invoice("u1", &created.invoice.id).unwrap();
    assert!(invoice.income_id.is_some());
    assert_eq!(f.incomes.list("u1").unwrap().len(), 1);

    let again = f.service.reconcile_invoices("u1").await.unwrap();
    assert_eq!(again, ReconcileReport::default());
}

#[tokio::test]
async fn test_reconcile_reports_failures() {
    let f = fixture(InvoiceIncomePolicy::Reconcile);
    f.incomes.fail_create.store(true, Ordering::SeqCst);
    let created = f.service.create_invoice("u1", honey_invoice()).await.unwrap();

    let report = f.service.reconcile_invoices("u1").await.unwrap();

    assert_eq!(report.repaired, 0);
    assert_eq!(report.failed, vec![created.invoice.id]);
}

#[tokio::test]
async fn test_delete_removes_derived_income() {
    let f = fixture(InvoiceIncomePolicy::Compensate);
    let created = f.service.create_invoice("u1", honey_invoice()).await.unwrap();

    f.service
        .delete_invoice("u1", &created.invoice.id)
        .await
        .unwrap();

    assert!(f.invoices.list("u1").unwrap().is_empty());
    assert!(f.incomes.list("u1").unwrap().is_empty());
}

#[tokio::test]
async fn test_other_user_cannot_delete_invoice() {
    let f = fixture(InvoiceIncomePolicy::Compensate);
    let created = f.service.create_invoice("u1", honey_invoice()).await.unwrap();

    let err = f
        .service
        .delete_invoice("u2", &created.invoice.id)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(f.incomes.list("u1").unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_update_is_plain() {
    let f = fixture(InvoiceIncomePolicy::Compensate);
    let created = f.service.create_invoice("u1", honey_invoice()).await.unwrap();

    let paid = f
        .service
        .update_status("u1", &created.invoice.id, InvoiceStatus::Paid)
        .await
        .unwrap();

    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert_eq!(paid.income_id, created.invoice.income_id);
    assert_eq!(f.incomes.list("u1").unwrap().len(), 1);
}
