//! SQLite storage implementation for invoices and their items.

mod model;
mod repository;

pub use model::{InvoiceDB, InvoiceItemDB};
pub use repository::InvoiceRepository;
