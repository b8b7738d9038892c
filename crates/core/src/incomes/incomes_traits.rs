use async_trait::async_trait;

use super::incomes_model::{Income, NewIncome};
use crate::errors::Result;

#[async_trait]
pub trait IncomeRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list(&self, user_id: &str) -> Result<Vec<Income>>;
    fn get_by_id(&self, user_id: &str, income_id: &str) -> Result<Income>;
    async fn create(&self, user_id: &str, new_income: NewIncome) -> Result<Income>;
    async fn update(&self, user_id: &str, income_id: &str, changes: NewIncome) -> Result<Income>;
    async fn delete(&self, user_id: &str, income_id: &str) -> Result<usize>;
    /// Removes incomes derived from the given invoice.
    async fn delete_by_invoice(&self, user_id: &str, invoice_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait IncomeServiceTrait: Send + Sync {
    fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>>;
    fn get_income(&self, user_id: &str, income_id: &str) -> Result<Income>;
    async fn create_income(&self, user_id: &str, new_income: NewIncome) -> Result<Income>;
    async fn update_income(
        &self,
        user_id: &str,
        income_id: &str,
        changes: NewIncome,
    ) -> Result<Income>;
    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()>;
}
