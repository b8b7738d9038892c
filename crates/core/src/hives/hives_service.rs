use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::hives_model::{Hive, NewHive};
use super::hives_traits::{HiveRepositoryTrait, HiveServiceTrait};
use crate::errors::{Error, Result};

pub struct HiveService {
    repository: Arc<dyn HiveRepositoryTrait>,
}

impl HiveService {
    pub fn new(repository: Arc<dyn HiveRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HiveServiceTrait for HiveService {
    fn list_hives(&self, user_id: &str) -> Result<Vec<Hive>> {
        self.repository.list(user_id)
    }

    fn get_hive(&self, user_id: &str, hive_id: &str) -> Result<Hive> {
        self.repository.get_by_id(user_id, hive_id)
    }

    async fn create_hive(&self, user_id: &str, new_hive: NewHive) -> Result<Hive> {
        new_hive.validate()?;
        debug!("Creating hive '{}' for user {}", new_hive.name, user_id);
        self.repository.create(user_id, new_hive).await
    }

    async fn update_hive(&self, user_id: &str, hive_id: &str, changes: NewHive) -> Result<Hive> {
        changes.validate()?;
        self.repository.update(user_id, hive_id, changes).await
    }

    async fn delete_hive(&self, user_id: &str, hive_id: &str) -> Result<()> {
        match self.repository.delete(user_id, hive_id).await? {
            0 => Err(Error::not_found("Hive", hive_id)),
            _ => Ok(()),
        }
    }
}
