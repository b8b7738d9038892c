//! SQLite storage implementation for inspections.

mod model;
mod repository;

pub use model::{InspectionChangesDB, InspectionDB};
pub use repository::InspectionRepository;
