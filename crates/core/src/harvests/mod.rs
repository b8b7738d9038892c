//! Harvests module - honey, wax and other hive products taken.

mod harvests_model;
mod harvests_service;
mod harvests_traits;

pub use harvests_model::{Harvest, HarvestProduct, NewHarvest};
pub use harvests_service::HarvestService;
pub use harvests_traits::{HarvestRepositoryTrait, HarvestServiceTrait};
