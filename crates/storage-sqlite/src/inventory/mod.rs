//! SQLite storage implementation for inventory items.

mod model;
mod repository;

pub use model::{InventoryItemChangesDB, InventoryItemDB};
pub use repository::InventoryRepository;
