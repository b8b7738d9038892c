use async_trait::async_trait;

use super::swarm_traps_model::{NewSwarmTrap, SwarmTrap};
use crate::errors::Result;

#[async_trait]
pub trait SwarmTrapRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<SwarmTrap>>;
    fn get_by_id(&self, user_id: &str, trap_id: &str) -> Result<SwarmTrap>;
    async fn create(&self, user_id: &str, new_trap: NewSwarmTrap) -> Result<SwarmTrap>;
    async fn update(&self, user_id: &str, trap_id: &str, changes: NewSwarmTrap)
        -> Result<SwarmTrap>;
    async fn delete(&self, user_id: &str, trap_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait SwarmTrapServiceTrait: Send + Sync {
    fn list_traps(&self, user_id: &str) -> Result<Vec<SwarmTrap>>;
    fn get_trap(&self, user_id: &str, trap_id: &str) -> Result<SwarmTrap>;
    async fn create_trap(&self, user_id: &str, new_trap: NewSwarmTrap) -> Result<SwarmTrap>;
    async fn update_trap(
        &self,
        user_id: &str,
        trap_id: &str,
        changes: NewSwarmTrap,
    ) -> Result<SwarmTrap>;
    async fn delete_trap(&self, user_id: &str, trap_id: &str) -> Result<()>;
}
