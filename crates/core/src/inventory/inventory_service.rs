use std::sync::Arc;

use async_trait::async_trait;

use super::inventory_model::{InventoryItem, NewInventoryItem};
use super::inventory_traits::{InventoryRepositoryTrait, InventoryServiceTrait};
use crate::errors::{Error, Result};

pub struct InventoryService {
    repository: Arc<dyn InventoryRepositoryTrait>,
}

impl InventoryService {
    pub fn new(repository: Arc<dyn InventoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl InventoryServiceTrait for InventoryService {
    fn list_items(&self, user_id: &str) -> Result<Vec<InventoryItem>> {
        self.repository.list(user_id)
    }

    fn get_item(&self, user_id: &str, item_id: &str) -> Result<InventoryItem> {
        self.repository.get_by_id(user_id, item_id)
    }

    async fn create_item(
        &self,
        user_id: &str,
        new_item: NewInventoryItem,
    ) -> Result<InventoryItem> {
        new_item.validate()?;
        self.repository.create(user_id, new_item).await
    }

    async fn update_item(
        &self,
        user_id: &str,
        item_id: &str,
        changes: NewInventoryItem,
    ) -> Result<InventoryItem> {
        changes.validate()?;
        self.repository.update(user_id, item_id, changes).await
    }

    async fn delete_item(&self, user_id: &str, item_id: &str) -> Result<()> {
        match self.repository.delete(user_id, item_id).await? {
            0 => Err(Error::not_found("InventoryItem", item_id)),
            _ => Ok(()),
        }
    }
}
