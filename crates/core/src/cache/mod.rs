//! In-process caches.

mod ttl_cache;

pub use ttl_cache::{Generation, TtlCache};
