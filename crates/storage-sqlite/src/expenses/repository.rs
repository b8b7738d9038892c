use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use hivebook_core::expenses::{Expense, ExpenseRepositoryTrait, NewExpense};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{ExpenseChangesDB, ExpenseDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::expenses;
use crate::utils::new_id;

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .order((expenses::spent_on.desc(), expenses::created_at.desc()))
            .select(ExpenseDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn get_by_id(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        let mut conn = get_connection(&self.pool)?;
        expenses::table
            .filter(expenses::id.eq(expense_id))
            .filter(expenses::user_id.eq(user_id))
            .select(ExpenseDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Expense::from)
            .ok_or_else(|| Error::not_found("Expense", expense_id))
    }

    async fn create(&self, user_id: &str, new_expense: NewExpense) -> Result<Expense> {
        let row = ExpenseDB::from_new(new_id(), user_id.to_string(), new_expense, now_naive());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(expenses::table)
                    .values(&row)
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(Expense::from)
            })
            .await
    }

    async fn update(
        &self,
        user_id: &str,
        expense_id: &str,
        changes: NewExpense,
    ) -> Result<Expense> {
        let changes = ExpenseChangesDB::from_new(changes, now_naive());
        let (user_id, expense_id) = (user_id.to_string(), expense_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    expenses::table
                        .filter(expenses::id.eq(expense_id.as_str()))
                        .filter(expenses::user_id.eq(user_id.as_str())),
                )
                .set(&changes)
                .returning(ExpenseDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Expense::from)
                    .ok_or_else(|| Error::not_found("Expense", expense_id))
            })
            .await
    }

    async fn delete(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        let (user_id, expense_id) = (user_id.to_string(), expense_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    expenses::table
                        .filter(expenses::id.eq(expense_id))
                        .filter(expenses::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
