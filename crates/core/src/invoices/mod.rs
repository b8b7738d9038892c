//! Invoices module - customer invoices and the income booked for them.

mod invoices_model;
mod invoices_service;
mod invoices_traits;

#[cfg(test)]
mod invoices_service_tests;

pub use invoices_model::{
    CreatedInvoice, Invoice, InvoiceIncomePolicy, InvoiceItem, InvoiceStatus, NewInvoice,
    ReconcileReport,
};
pub use invoices_service::InvoiceService;
pub use invoices_traits::{InvoiceRepositoryTrait, InvoiceServiceTrait};
