//! SQLite storage implementation for hives.

mod model;
mod repository;

pub use model::{HiveDB, HiveChangesDB};
pub use repository::HiveRepository;
