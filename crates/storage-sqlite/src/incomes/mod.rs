//! SQLite storage implementation for incomes.

mod model;
mod repository;

pub use model::{IncomeChangesDB, IncomeDB};
pub use repository::IncomeRepository;
