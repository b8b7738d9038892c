//! Swarm traps module - bait hives set out to catch swarms.

mod swarm_traps_model;
mod swarm_traps_service;
mod swarm_traps_traits;

pub use swarm_traps_model::{NewSwarmTrap, SwarmTrap, SwarmTrapStatus};
pub use swarm_traps_service::SwarmTrapService;
pub use swarm_traps_traits::{SwarmTrapRepositoryTrait, SwarmTrapServiceTrait};
