use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::expenses_model::{Expense, NewExpense};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.repository.list(user_id)
    }

    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        self.repository.get_by_id(user_id, expense_id)
    }

    async fn create_expense(&self, user_id: &str, new_expense: NewExpense) -> Result<Expense> {
        new_expense.validate()?;
        debug!(
            "Recording {} expense of {} for user {}",
            new_expense.category, new_expense.amount, user_id
        );
        let expense = self.repository.create(user_id, new_expense).await?;
        self.event_sink.emit(DomainEvent::expenses_changed(user_id));
        Ok(expense)
    }

    async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        changes: NewExpense,
    ) -> Result<Expense> {
        changes.validate()?;
        let expense = self.repository.update(user_id, expense_id, changes).await?;
        self.event_sink.emit(DomainEvent::expenses_changed(user_id));
        Ok(expense)
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        if self.repository.delete(user_id, expense_id).await? == 0 {
            return Err(Error::not_found("Expense", expense_id));
        }
        self.event_sink.emit(DomainEvent::expenses_changed(user_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use crate::utils::now_naive;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockExpenseRepository {
        expenses: Mutex<Vec<Expense>>,
    }

    #[async_trait]
    impl ExpenseRepositoryTrait for MockExpenseRepository {
        fn list(&self, user_id: &str) -> Result<Vec<Expense>> {
            Ok(self
                .expenses
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect())
        }

        fn get_by_id(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
            self.list(user_id)?
                .into_iter()
                .find(|e| e.id == expense_id)
                .ok_or_else(|| Error::not_found("Expense", expense_id))
        }

        async fn create(&self, user_id: &str, new_expense: NewExpense) -> Result<Expense> {
            let mut expenses = self.expenses.lock().unwrap();
            let expense = Expense {
                id: format!("exp-{}", expenses.len() + 1),
                user_id: user_id.to_string(),
                spent_on: new_expense.spent_on,
                amount: new_expense.amount,
                category: new_expense.category,
                vendor: new_expense.vendor,
                description: new_expense.description,
                created_at: now_naive(),
                updated_at: now_naive(),
            };
            expenses.push(expense.clone());
            Ok(expense)
        }

        async fn update(
            &self,
            user_id: &str,
            expense_id: &str,
            changes: NewExpense,
        ) -> Result<Expense> {
            let mut expenses = self.expenses.lock().unwrap();
            let expense = expenses
                .iter_mut()
                .find(|e| e.id == expense_id && e.user_id == user_id)
                .ok_or_else(|| Error::not_found("Expense", expense_id))?;
            expense.amount = changes.amount;
            expense.category = changes.category;
            Ok(expense.clone())
        }

        async fn delete(&self, user_id: &str, expense_id: &str) -> Result<usize> {
            let mut expenses = self.expenses.lock().unwrap();
            let before = expenses.len();
            expenses.retain(|e| !(e.id == expense_id && e.user_id == user_id));
            Ok(before - expenses.len())
        }
    }

    fn feed(amount: rust_decimal::Decimal) -> NewExpense {
        NewExpense {
            spent_on: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            amount,
            category: "Feed".to_string(),
            vendor: Some("Mann Lake".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_emits_event() {
        let sink = Arc::new(MockDomainEventSink::new());
        let service = ExpenseService::new(Arc::new(MockExpenseRepository::default()), sink.clone());

        service.create_expense("u1", feed(dec!(18.99))).await.unwrap();

        assert_eq!(sink.events(), vec![DomainEvent::expenses_changed("u1")]);
    }

    #[tokio::test]
    async fn test_invalid_expense_emits_nothing() {
        let sink = Arc::new(MockDomainEventSink::new());
        let service = ExpenseService::new(Arc::new(MockExpenseRepository::default()), sink.clone());

        let err = service.create_expense("u1", feed(dec!(-5))).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_other_users_expense_is_not_found() {
        let sink = Arc::new(MockDomainEventSink::new());
        let service = ExpenseService::new(Arc::new(MockExpenseRepository::default()), sink);

        let expense = service.create_expense("u1", feed(dec!(10))).await.unwrap();

        assert!(service.get_expense("u2", &expense.id).unwrap_err().is_not_found());
        assert!(service
            .delete_expense("u2", &expense.id)
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(service.list_expenses("u1").unwrap().len(), 1);
    }
}
