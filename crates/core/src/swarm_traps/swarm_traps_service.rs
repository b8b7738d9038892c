use std::sync::Arc;

use async_trait::async_trait;

use super::swarm_traps_model::{NewSwarmTrap, SwarmTrap};
use super::swarm_traps_traits::{SwarmTrapRepositoryTrait, SwarmTrapServiceTrait};
use crate::errors::{Error, Result};

pub struct SwarmTrapService {
    repository: Arc<dyn SwarmTrapRepositoryTrait>,
}

impl SwarmTrapService {
    pub fn new(repository: Arc<dyn SwarmTrapRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl SwarmTrapServiceTrait for SwarmTrapService {
    fn list_traps(&self, user_id: &str) -> Result<Vec<SwarmTrap>> {
        self.repository.list(user_id)
    }

    fn get_trap(&self, user_id: &str, trap_id: &str) -> Result<SwarmTrap> {
        self.repository.get_by_id(user_id, trap_id)
    }

    async fn create_trap(&self, user_id: &str, new_trap: NewSwarmTrap) -> Result<SwarmTrap> {
        new_trap.validate()?;
        self.repository.create(user_id, new_trap).await
    }

    async fn update_trap(
        &self,
        user_id: &str,
        trap_id: &str,
        changes: NewSwarmTrap,
    ) -> Result<SwarmTrap> {
        changes.validate()?;
        self.repository.update(user_id, trap_id, changes).await
    }

    async fn delete_trap(&self, user_id: &str, trap_id: &str) -> Result<()> {
        match self.repository.delete(user_id, trap_id).await? {
            0 => Err(Error::not_found("SwarmTrap", trap_id)),
            _ => Ok(()),
        }
    }
}
