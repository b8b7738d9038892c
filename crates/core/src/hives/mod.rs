//! Hives module - domain models, services, and traits.

mod hives_model;
mod hives_service;
mod hives_traits;

pub use hives_model::{Hive, HiveStatus, NewHive};
pub use hives_service::HiveService;
pub use hives_traits::{HiveRepositoryTrait, HiveServiceTrait};
