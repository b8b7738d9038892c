//! Expenses module - money spent on the operation.

mod expenses_model;
mod expenses_service;
mod expenses_traits;

pub use expenses_model::{Expense, NewExpense};
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
