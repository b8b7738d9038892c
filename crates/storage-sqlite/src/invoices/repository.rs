use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use hivebook_core::invoices::{Invoice, InvoiceRepositoryTrait, InvoiceStatus, NewInvoice};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{InvoiceDB, InvoiceItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{invoice_items, invoices};
use crate::utils::new_id;

pub struct InvoiceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvoiceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_items(conn: &mut SqliteConnection, invoice: InvoiceDB) -> Result<Invoice> {
    let items = InvoiceItemDB::belonging_to(&invoice)
        .order(invoice_items::position.asc())
        .select(InvoiceItemDB::as_select())
        .load(conn)
        .into_core()?;
    Ok(invoice.into_domain(items))
}

fn find_owned(
    conn: &mut SqliteConnection,
    user_id: &str,
    invoice_id: &str,
) -> Result<Option<InvoiceDB>> {
    invoices::table
        .filter(invoices::id.eq(invoice_id))
        .filter(invoices::user_id.eq(user_id))
        .select(InvoiceDB::as_select())
        .first(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl InvoiceRepositoryTrait for InvoiceRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Invoice>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = invoices::table
            .filter(invoices::user_id.eq(user_id))
            .order((invoices::issued_on.desc(), invoices::created_at.desc()))
            .select(InvoiceDB::as_select())
            .load(&mut conn)
            .into_core()?;

        let items = InvoiceItemDB::belonging_to(&rows)
            .order(invoice_items::position.asc())
            .select(InvoiceItemDB::as_select())
            .load(&mut conn)
            .into_core()?;

        Ok(items
            .grouped_by(&rows)
            .into_iter()
            .zip(rows)
            .map(|(items, invoice)| invoice.into_domain(items))
            .collect())
    }

    fn get_by_id(&self, user_id: &str, invoice_id: &str) -> Result<Invoice> {
        let mut conn = get_connection(&self.pool)?;
        match find_owned(&mut conn, user_id, invoice_id)? {
            Some(invoice) => load_items(&mut conn, invoice),
            None => Err(Error::not_found("Invoice", invoice_id)),
        }
    }

    async fn create(&self, user_id: &str, new_invoice: NewInvoice) -> Result<Invoice> {
        let row = InvoiceDB::from_new(new_id(), user_id.to_string(), &new_invoice, now_naive());
        let items: Vec<InvoiceItemDB> = new_invoice
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                InvoiceItemDB::from_item(new_id(), &row.id, position as i32, item)
            })
            .collect();

        self.writer
            .exec(move |conn| {
                let inserted = diesel::insert_into(invoices::table)
                    .values(&row)
                    .returning(InvoiceDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                diesel::insert_into(invoice_items::table)
                    .values(&items)
                    .execute(conn)
                    .into_core()?;
                Ok(inserted.into_domain(items))
            })
            .await
    }

    async fn set_income(
        &self,
        user_id: &str,
        invoice_id: &str,
        income_id: Option<String>,
    ) -> Result<Invoice> {
        let (user_id, invoice_id) = (user_id.to_string(), invoice_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    invoices::table
                        .filter(invoices::id.eq(invoice_id.as_str()))
                        .filter(invoices::user_id.eq(user_id.as_str())),
                )
                .set((
                    invoices::income_id.eq(income_id),
                    invoices::updated_at.eq(now_naive()),
                ))
                .returning(InvoiceDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                match updated {
                    Some(invoice) => load_items(conn, invoice),
                    None => Err(Error::not_found("Invoice", invoice_id)),
                }
            })
            .await
    }

    async fn update_status(
        &self,
        user_id: &str,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<Invoice> {
        let (user_id, invoice_id) = (user_id.to_string(), invoice_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    invoices::table
                        .filter(invoices::id.eq(invoice_id.as_str()))
                        .filter(invoices::user_id.eq(user_id.as_str())),
                )
                .set((
                    invoices::status.eq(status.as_str()),
                    invoices::updated_at.eq(now_naive()),
                ))
                .returning(InvoiceDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                match updated {
                    Some(invoice) => load_items(conn, invoice),
                    None => Err(Error::not_found("Invoice", invoice_id)),
                }
            })
            .await
    }

    async fn delete(&self, user_id: &str, invoice_id: &str) -> Result<usize> {
        let (user_id, invoice_id) = (user_id.to_string(), invoice_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    invoices::table
                        .filter(invoices::id.eq(invoice_id))
                        .filter(invoices::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incomes::IncomeRepository;
    use crate::test_utils::{create_test_user, setup_db};
    use chrono::NaiveDate;
    use hivebook_core::incomes::{IncomeRepositoryTrait, NewIncome};
    use hivebook_core::invoices::InvoiceItem;
    use rust_decimal_macros::dec;

    fn new_invoice(number: &str) -> NewInvoice {
        NewInvoice {
            invoice_number: number.to_string(),
            customer_name: "Farm stand".to_string(),
            customer_email: None,
            issued_on: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            due_on: None,
            items: vec![
                InvoiceItem {
                    description: "1 lb jar".to_string(),
                    quantity: dec!(12),
                    unit_price: dec!(9.50),
                },
                InvoiceItem {
                    description: "Comb honey".to_string(),
                    quantity: dec!(2),
                    unit_price: dec!(15),
                },
            ],
            status: InvoiceStatus::Draft,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_item_order_and_total() {
        let (pool, writer, _temp_dir) = setup_db().await;
        let user = create_test_user(&pool, &writer, "keeper").await;
        let repo = InvoiceRepository::new(pool, writer);

        let created = repo.create(&user.id, new_invoice("2024-001")).await.unwrap();
        assert_eq!(created.total, dec!(144));
        assert!(created.income_id.is_none());

        let loaded = repo.get_by_id(&user.id, &created.id).unwrap();
        assert_eq!(loaded.items.len(), 2);
        assert_eq!(loaded.items[0].description, "1 lb jar");
        assert_eq!(loaded.items[1].unit_price, dec!(15));

        let listed = repo.list(&user.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].items, loaded.items);
    }

    #[tokio::test]
    async fn test_invoice_number_unique_per_user() {
        let (pool, writer, _temp_dir) = setup_db().await;
        let alice = create_test_user(&pool, &writer, "alice").await;
        let bob = create_test_user(&pool, &writer, "bob").await;
        let repo = InvoiceRepository::new(pool, writer);

        repo.create(&alice.id, new_invoice("2024-001")).await.unwrap();
        assert!(repo.create(&bob.id, new_invoice("2024-001")).await.is_ok());

        let err = repo
            .create(&alice.id, new_invoice("2024-001"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(hivebook_core::errors::DatabaseError::UniqueViolation(_))
        ));
        // The failed insert left no stray items behind.
        assert_eq!(repo.list(&alice.id).unwrap()[0].items.len(), 2);
    }

    #[tokio::test]
    async fn test_other_user_cannot_touch_invoice() {
        let (pool, writer, _temp_dir) = setup_db().await;
        let alice = create_test_user(&pool, &writer, "alice").await;
        let bob = create_test_user(&pool, &writer, "bob").await;
        let repo = InvoiceRepository::new(pool, writer);

        let invoice = repo.create(&alice.id, new_invoice("2024-001")).await.unwrap();

        assert!(repo.get_by_id(&bob.id, &invoice.id).unwrap_err().is_not_found());
        assert!(repo
            .update_status(&bob.id, &invoice.id, InvoiceStatus::Paid)
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(repo.delete(&bob.id, &invoice.id).await.unwrap(), 0);
        assert!(repo.list(&bob.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_income_and_delete_unlinks_income() {
        let (pool, writer, _temp_dir) = setup_db().await;
        let user = create_test_user(&pool, &writer, "keeper").await;
        let invoices = InvoiceRepository::new(pool.clone(), writer.clone());
        let incomes = IncomeRepository::new(pool, writer);

        let invoice = invoices.create(&user.id, new_invoice("2024-002")).await.unwrap();
        let income = incomes
            .create(
                &user.id,
                NewIncome::for_invoice(
                    &invoice.id,
                    &invoice.invoice_number,
                    invoice.issued_on,
                    invoice.total,
                ),
            )
            .await
            .unwrap();

        let linked = invoices
            .set_income(&user.id, &invoice.id, Some(income.id.clone()))
            .await
            .unwrap();
        assert_eq!(linked.income_id.as_deref(), Some(income.id.as_str()));
        assert_eq!(linked.items.len(), 2);

        let paid = invoices
            .update_status(&user.id, &invoice.id, InvoiceStatus::Paid)
            .await
            .unwrap();
        assert_eq!(paid.status, InvoiceStatus::Paid);

        assert_eq!(invoices.delete(&user.id, &invoice.id).await.unwrap(), 1);
        let orphan = incomes.get_by_id(&user.id, &income.id).unwrap();
        assert!(orphan.invoice_id.is_none());
    }
}
