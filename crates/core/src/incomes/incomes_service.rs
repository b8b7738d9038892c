use std::sync::Arc;

use async_trait::async_trait;

use super::incomes_model::{Income, NewIncome};
use super::incomes_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

pub struct IncomeService {
    repository: Arc<dyn IncomeRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl IncomeService {
    pub fn new(
        repository: Arc<dyn IncomeRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl IncomeServiceTrait for IncomeService {
    fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        self.repository.list(user_id)
    }

    fn get_income(&self, user_id: &str, income_id: &str) -> Result<Income> {
        self.repository.get_by_id(user_id, income_id)
    }

    async fn create_income(&self, user_id: &str, new_income: NewIncome) -> Result<Income> {
        new_income.validate()?;
        if new_income.invoice_id.is_some() {
            return Err(Error::invalid(
                "invoice incomes are booked by the invoice workflow",
            ));
        }
        let income = self.repository.create(user_id, new_income).await?;
        self.event_sink.emit(DomainEvent::incomes_changed(user_id));
        Ok(income)
    }

    async fn update_income(
        &self,
        user_id: &str,
        income_id: &str,
        mut changes: NewIncome,
    ) -> Result<Income> {
        changes.validate()?;
        // The invoice link is owned by the invoice workflow.
        let existing = self.repository.get_by_id(user_id, income_id)?;
        changes.invoice_id = existing.invoice_id;
        let income = self.repository.update(user_id, income_id, changes).await?;
        self.event_sink.emit(DomainEvent::incomes_changed(user_id));
        Ok(income)
    }

    async fn delete_income(&self, user_id: &str, income_id: &str) -> Result<()> {
        let existing = self.repository.get_by_id(user_id, income_id)?;
        if let Some(invoice_id) = existing.invoice_id {
            return Err(Error::invalid(format!(
                "income {income_id} belongs to invoice {invoice_id}; delete the invoice instead"
            )));
        }
        if self.repository.delete(user_id, income_id).await? == 0 {
            return Err(Error::not_found("Income", income_id));
        }
        self.event_sink.emit(DomainEvent::incomes_changed(user_id));
        Ok(())
    }
}
