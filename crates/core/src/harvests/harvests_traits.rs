use async_trait::async_trait;

use super::harvests_model::{Harvest, NewHarvest};
use crate::errors::Result;

#[async_trait]
pub trait HarvestRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list(&self, user_id: &str) -> Result<Vec<Harvest>>;
    fn get_by_id(&self, user_id: &str, harvest_id: &str) -> Result<Harvest>;
    async fn create(&self, user_id: &str, new_harvest: NewHarvest) -> Result<Harvest>;
    async fn update(&self, user_id: &str, harvest_id: &str, changes: NewHarvest)
        -> Result<Harvest>;
    async fn delete(&self, user_id: &str, harvest_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait HarvestServiceTrait: Send + Sync {
    fn list_harvests(&self, user_id: &str) -> Result<Vec<Harvest>>;
    fn get_harvest(&self, user_id: &str, harvest_id: &str) -> Result<Harvest>;
    async fn create_harvest(&self, user_id: &str, new_harvest: NewHarvest) -> Result<Harvest>;
    async fn update_harvest(
        &self,
        user_id: &str,
        harvest_id: &str,
        changes: NewHarvest,
    ) -> Result<Harvest>;
    async fn delete_harvest(&self, user_id: &str, harvest_id: &str) -> Result<()>;
}
