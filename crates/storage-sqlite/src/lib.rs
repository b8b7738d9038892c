//! SQLite storage implementation for Hivebook.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `hivebook-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//! server (http)
//!       │
//!       ▼
//! core (domain)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

#[cfg(test)]
mod test_utils;

// Repository implementations
pub mod expenses;
pub mod harvests;
pub mod hives;
pub mod incomes;
pub mod inspections;
pub mod inventory;
pub mod invoices;
pub mod swarm_traps;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, ping, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from hivebook-core for convenience
pub use hivebook_core::errors::{DatabaseError, Error, Result};
