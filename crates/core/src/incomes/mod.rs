//! Incomes module - money received, manually entered or derived from invoices.

mod incomes_model;
mod incomes_service;
mod incomes_traits;

pub use incomes_model::{Income, NewIncome};
pub use incomes_service::IncomeService;
pub use incomes_traits::{IncomeRepositoryTrait, IncomeServiceTrait};
