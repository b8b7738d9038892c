//! Hivebook Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Hivebook. It is
//! database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod cache;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod expenses;
pub mod harvests;
pub mod hives;
pub mod incomes;
pub mod inspections;
pub mod inventory;
pub mod invoices;
pub mod swarm_traps;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
