//! Inventory module - equipment and supplies on hand.

mod inventory_model;
mod inventory_service;
mod inventory_traits;

pub use inventory_model::{InventoryItem, NewInventoryItem};
pub use inventory_service::InventoryService;
pub use inventory_traits::{InventoryRepositoryTrait, InventoryServiceTrait};
