use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use hivebook_core::incomes::{Income, IncomeRepositoryTrait, NewIncome};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{IncomeChangesDB, IncomeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::incomes;
use crate::utils::new_id;

pub struct IncomeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl IncomeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl IncomeRepositoryTrait for IncomeRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Income>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = incomes::table
            .filter(incomes::user_id.eq(user_id))
            .order((incomes::received_on.desc(), incomes::created_at.desc()))
            .select(IncomeDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Income::from).collect())
    }

    fn get_by_id(&self, user_id: &str, income_id: &str) -> Result<Income> {
        let mut conn = get_connection(&self.pool)?;
        incomes::table
            .filter(incomes::id.eq(income_id))
            .filter(incomes::user_id.eq(user_id))
            .select(IncomeDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Income::from)
            .ok_or_else(|| Error::not_found("Income", income_id))
    }

    async fn create(&self, user_id: &str, new_income: NewIncome) -> Result<Income> {
        let row = IncomeDB::from_new(new_id(), user_id.to_string(), new_income, now_naive());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(incomes::table)
                    .values(&row)
                    .returning(IncomeDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(Income::from)
            })
            .await
    }

    async fn update(&self, user_id: &str, income_id: &str, changes: NewIncome) -> Result<Income> {
        let changes = IncomeChangesDB::from_new(changes, now_naive());
        let (user_id, income_id) = (user_id.to_string(), income_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    incomes::table
                        .filter(incomes::id.eq(income_id.as_str()))
                        .filter(incomes::user_id.eq(user_id.as_str())),
                )
                .set(&changes)
                .returning(IncomeDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Income::from)
                    .ok_or_else(|| Error::not_found("Income", income_id))
            })
            .await
    }

    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize> {
        let (user_id, income_id) = (user_id.to_string(), income_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    incomes::table
                        .filter(incomes::id.eq(income_id))
                        .filter(incomes::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    async fn delete_by_invoice(&self, user_id: &str, invoice_id: &str) -> Result<usize> {
        let (user_id, invoice_id) = (user_id.to_string(), invoice_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    incomes::table
                        .filter(incomes::invoice_id.eq(invoice_id))
                        .filter(incomes::user_id.eq(user_id)),
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
    use crate::test_utils::{create_test_user, setup_db};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn new_income(day: u32, amount: rust_decimal::Decimal) -> NewIncome {
        NewIncome {
            received_on: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            amount,
            source: "Market".to_string(),
            description: None,
            invoice_id: None,
        }
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_newest_first() {
        let (pool, writer, _temp_dir) = setup_db().await;
        let alice = create_test_user(&pool, &writer, "alice").await;
        let bob = create_test_user(&pool, &writer, "bob").await;
        let repo = IncomeRepository::new(pool, writer);

        repo.create(&alice.id, new_income(1, dec!(10))).await.unwrap();
        repo.create(&alice.id, new_income(5, dec!(20.25))).await.unwrap();
        repo.create(&bob.id, new_income(3, dec!(99))).await.unwrap();

        let listed = repo.list(&alice.id).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].amount, dec!(20.25));
        assert_eq!(listed[1].amount, dec!(10));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let (pool, writer, _temp_dir) = setup_db().await;
        let user = create_test_user(&pool, &writer, "keeper").await;
        let repo = IncomeRepository::new(pool, writer);

        let err = repo
            .update(&user.id, "missing", new_income(1, dec!(1)))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.delete(&user.id, "missing").await.unwrap(), 0);

        let income = repo.create(&user.id, new_income(1, dec!(1))).await.unwrap();
        let mut changes = new_income(2, dec!(3.5));
        changes.description = Some("Farmers market".to_string());
        let updated = repo.update(&user.id, &income.id, changes).await.unwrap();
        assert_eq!(updated.amount, dec!(3.5));
        assert_eq!(updated.description.as_deref(), Some("Farmers market"));
        assert_eq!(repo.delete(&user.id, &income.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_invoice_only_removes_linked() {
        let (pool, writer, _temp_dir) = setup_db().await;
        let user = create_test_user(&pool, &writer, "keeper").await;
        let repo = IncomeRepository::new(pool.clone(), writer.clone());

        let invoice = crate::invoices::InvoiceRepository::new(pool, writer);
        let created = {
            use hivebook_core::invoices::{
                InvoiceItem, InvoiceRepositoryTrait, InvoiceStatus, NewInvoice,
            };
            invoice
                .create(
                    &user.id,
                    NewInvoice {
                        invoice_number: "2024-010".to_string(),
                        customer_name: "Bakery".to_string(),
                        customer_email: None,
                        issued_on: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                        due_on: None,
                        items: vec![InvoiceItem {
                            description: "Bucket".to_string(),
                            quantity: dec!(1),
                            unit_price: dec!(80),
                        }],
                        status: InvoiceStatus::Sent,
                        notes: None,
                    },
                )
                .await
                .unwrap()
        };

        let mut linked = new_income(1, dec!(80));
        linked.invoice_id = Some(created.id.clone());
        repo.create(&user.id, linked).await.unwrap();
        repo.create(&user.id, new_income(2, dec!(5))).await.unwrap();

        assert_eq!(repo.delete_by_invoice(&user.id, &created.id).await.unwrap(), 1);
        let remaining = repo.list(&user.id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].invoice_id.is_none());
    }
}
