//! SQLite storage implementation for harvests.

mod model;
mod repository;

pub use model::{HarvestChangesDB, HarvestDB};
pub use repository::HarvestRepository;
