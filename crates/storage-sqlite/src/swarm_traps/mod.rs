//! SQLite storage implementation for swarm traps.

mod model;
mod repository;

pub use model::{SwarmTrapChangesDB, SwarmTrapDB};
pub use repository::SwarmTrapRepository;
