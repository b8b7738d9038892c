use async_trait::async_trait;

use super::inventory_model::{InventoryItem, NewInventoryItem};
use crate::errors::Result;

#[async_trait]
pub trait InventoryRepositoryTrait: Send + Sync {
    /// Sorted by name.
    fn list(&self, user_id: &str) -> Result<Vec<InventoryItem>>;
    fn get_by_id(&self, user_id: &str, item_id: &str) -> Result<InventoryItem>;
    async fn create(&self, user_id: &str, new_item: NewInventoryItem) -> Result<InventoryItem>;
    async fn update(
        &self,
        user_id: &str,
        item_id: &str,
        changes: NewInventoryItem,
    ) -> Result<InventoryItem>;
    async fn delete(&self, user_id: &str, item_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait InventoryServiceTrait: Send + Sync {
    fn list_items(&self, user_id: &str) -> Result<Vec<InventoryItem>>;
    fn get_item(&self, user_id: &str, item_id: &str) -> Result<InventoryItem>;
    async fn create_item(&self, user_id: &str, new_item: NewInventoryItem)
        -> Result<InventoryItem>;
    async fn update_item(
        &self,
        user_id: &str,
        item_id: &str,
        changes: NewInventoryItem,
    ) -> Result<InventoryItem>;
    async fn delete_item(&self, user_id: &str, item_id: &str) -> Result<()>;
}
