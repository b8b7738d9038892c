use async_trait::async_trait;

use super::expenses_model::{Expense, NewExpense};
use crate::errors::Result;

#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list(&self, user_id: &str) -> Result<Vec<Expense>>;
    fn get_by_id(&self, user_id: &str, expense_id: &str) -> Result<Expense>;
    async fn create(&self, user_id: &str, new_expense: NewExpense) -> Result<Expense>;
    async fn update(
        &self,
        user_id: &str,
        expense_id: &str,
        changes: NewExpense,
    ) -> Result<Expense>;
    async fn delete(&self, user_id: &str, expense_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>>;
    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense>;
    async fn create_expense(&self, user_id: &str, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        changes: NewExpense,
    ) -> Result<Expense>;
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
}
