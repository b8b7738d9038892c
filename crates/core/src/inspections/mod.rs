//! Inspections module - hive inspection log.

mod inspections_model;
mod inspections_service;
mod inspections_traits;

pub use inspections_model::{Inspection, NewInspection};
pub use inspections_service::InspectionService;
pub use inspections_traits::{InspectionRepositoryTrait, InspectionServiceTrait};
