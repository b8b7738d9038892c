use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info, warn};

use super::invoices_model::{
    CreatedInvoice, Invoice, InvoiceIncomePolicy, InvoiceStatus, NewInvoice, ReconcileReport,
};
use super::invoices_traits::{InvoiceRepositoryTrait, InvoiceServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::incomes::{IncomeRepositoryTrait, NewIncome};

/// Why an income could not be booked for an invoice.
struct BookingFailure {
    error: Error,
    /// Income created but neither linked nor removed.
    orphan_income: Option<String>,
}

impl BookingFailure {
    fn clean(error: Error) -> Self {
        Self {
            error,
            orphan_income: None,
        }
    }
}

/// Invoice workflow.
///
/// Creating an invoice is two writes: the invoice row, then the income it
/// earns. The second write can fail independently, and `income_policy`
/// decides whether the first one is rolled back or left for
/// [`InvoiceServiceTrait::reconcile_invoices`].
pub struct InvoiceService {
    repository: Arc<dyn InvoiceRepositoryTrait>,
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    income_policy: InvoiceIncomePolicy,
}

impl InvoiceService {
    pub fn new(
        repository: Arc<dyn InvoiceRepositoryTrait>,
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        income_policy: InvoiceIncomePolicy,
    ) -> Self {
        Self {
            repository,
            income_repository,
            event_sink,
            income_policy,
        }
    }

    pub fn income_policy(&self) -> InvoiceIncomePolicy {
        self.income_policy
    }

    /// Creates the income for `invoice` and links it back.
    ///
    /// On a failed link the new income is removed again. If that removal
    /// fails too, the failure carries the id of the income left behind.
    async fn book_income(
        &self,
        user_id: &str,
        invoice: &Invoice,
    ) -> std::result::Result<Invoice, BookingFailure> {
        let new_income = NewIncome::for_invoice(
            &invoice.id,
            &invoice.invoice_number,
            invoice.issued_on,
            invoice.total,
        );
        let income = self
            .income_repository
            .create(user_id, new_income)
            .await
            .map_err(BookingFailure::clean)?;

        match self
            .repository
            .set_income(user_id, &invoice.id, Some(income.id.clone()))
            .await
        {
            Ok(linked) => Ok(linked),
            Err(link_err) => {
                match self.income_repository.delete(user_id, &income.id).await {
                    Ok(_) => Err(BookingFailure::clean(link_err)),
                    Err(cleanup_err) => {
                        error!(
                            "Failed to remove unlinked income {} of invoice {}: {}",
                            income.id, invoice.id, cleanup_err
                        );
                        Err(BookingFailure {
                            error: link_err,
                            orphan_income: Some(income.id),
                        })
                    }
                }
            }
        }
    }

    fn emit_changed(&self, user_id: &str, invoice_id: &str) {
        self.event_sink.emit_batch(vec![
            DomainEvent::invoices_changed(user_id, vec![invoice_id.to_string()]),
            DomainEvent::incomes_changed(user_id),
        ]);
    }
}

#[async_trait]
impl InvoiceServiceTrait for InvoiceService {
    fn list_invoices(&self, user_id: &str) -> Result<Vec<Invoice>> {
        self.repository.list(user_id)
    }

    fn get_invoice(&self, user_id: &str, invoice_id: &str) -> Result<Invoice> {
        self.repository.get_by_id(user_id, invoice_id)
    }

    async fn create_invoice(
        &self,
        user_id: &str,
        new_invoice: NewInvoice,
    ) -> Result<CreatedInvoice> {
        new_invoice.validate()?;
        debug!(
            "Creating invoice {} for user {}",
            new_invoice.invoice_number, user_id
        );
        let invoice = self.repository.create(user_id, new_invoice).await?;

        let booked = self.book_income(user_id, &invoice).await;
        let created = match (booked, self.income_policy) {
            (Ok(linked), _) => CreatedInvoice {
                invoice: linked,
                income_pending: false,
            },
            (Err(failure), InvoiceIncomePolicy::Compensate) => {
                let booking_err = failure.error;
                if let Some(income_id) = failure.orphan_income {
                    // The invoice stays so reconcile can clear the income.
                    self.emit_changed(user_id, &invoice.id);
                    return Err(Error::Saga(format!(
                        "income booking for invoice {} failed ({}) and income {} could not be removed",
                        invoice.id, booking_err, income_id
                    )));
                }
                warn!(
                    "Income booking for invoice {} failed, removing the invoice: {}",
                    invoice.id, booking_err
                );
                if let Err(compensation_err) = self.repository.delete(user_id, &invoice.id).await {
                    error!(
                        "Could not remove invoice {} after failed income booking: {}",
                        invoice.id, compensation_err
                    );
                    return Err(Error::Saga(format!(
                        "income booking for invoice {} failed ({}) and the invoice could not be removed ({})",
                        invoice.id, booking_err, compensation_err
                    )));
                }
                return Err(booking_err);
            }
            (Err(failure), InvoiceIncomePolicy::Reconcile) => {
                warn!(
                    "Income booking for invoice {} failed, leaving it pending: {}",
                    invoice.id, failure.error
                );
                CreatedInvoice {
                    invoice,
                    income_pending: true,
                }
            }
        };

        self.emit_changed(user_id, &created.invoice.id);
        Ok(created)
    }

    async fn update_status(
        &self,
        user_id: &str,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<Invoice> {
        let invoice = self
            .repository
            .update_status(user_id, invoice_id, status)
            .await?;
        self.event_sink.emit(DomainEvent::invoices_changed(
            user_id,
            vec![invoice_id.to_string()],
        ));
        Ok(invoice)
    }

    async fn delete_invoice(&self, user_id: &str, invoice_id: &str) -> Result<()> {
        // Ownership check before touching the incomes.
        self.repository.get_by_id(user_id, invoice_id)?;
        let removed_incomes = self
            .income_repository
            .delete_by_invoice(user_id, invoice_id)
            .await?;
        if self.repository.delete(user_id, invoice_id).await? == 0 {
            return Err(Error::not_found("Invoice", invoice_id));
        }
        debug!(
            "Deleted invoice {} and {} derived income(s)",
            invoice_id, removed_incomes
        );
        self.emit_changed(user_id, invoice_id);
        Ok(())
    }

    async fn reconcile_invoices(&self, user_id: &str) -> Result<ReconcileReport> {
        let pending: Vec<Invoice> = self
            .repository
            .list(user_id)?
            .into_iter()
            .filter(|invoice| invoice.income_id.is_none())
            .collect();

        let mut report = ReconcileReport::default();
        let mut repaired_ids = Vec::new();
        let mut incomes_touched = false;
        for invoice in pending {
            // Leftovers of an earlier half-finished booking.
            let booked = match self
                .income_repository
                .delete_by_invoice(user_id, &invoice.id)
                .await
            {
                Ok(_) => self.book_income(user_id, &invoice).await,
                Err(e) => Err(BookingFailure::clean(e)),
            };
            match booked {
                Ok(_) => {
                    report.repaired += 1;
                    repaired_ids.push(invoice.id);
                }
                Err(failure) => {
                    warn!(
                        "Could not book income for invoice {}: {}",
                        invoice.id, failure.error
                    );
                    incomes_touched |= failure.orphan_income.is_some();
                    report.failed.push(invoice.id);
                }
            }
        }

        if !repaired_ids.is_empty() {
            info!(
                "Reconciled {} invoice(s) for user {}",
                report.repaired, user_id
            );
            self.event_sink.emit_batch(vec![
                DomainEvent::invoices_changed(user_id, repaired_ids),
                DomainEvent::incomes_changed(user_id),
            ]);
        } else if incomes_touched {
            self.event_sink.emit(DomainEvent::incomes_changed(user_id));
        }
        Ok(report)
    }
}
