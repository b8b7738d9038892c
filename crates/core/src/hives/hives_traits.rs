use async_trait::async_trait;

use super::hives_model::{Hive, NewHive};
use crate::errors::Result;

/// Persistence contract for hives. Every call is scoped to one user.
#[async_trait]
pub trait HiveRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<Hive>>;
    fn get_by_id(&self, user_id: &str, hive_id: &str) -> Result<Hive>;
    async fn create(&self, user_id: &str, new_hive: NewHive) -> Result<Hive>;
    async fn update(&self, user_id: &str, hive_id: &str, changes: NewHive) -> Result<Hive>;
    /// Returns the number of deleted rows.
    async fn delete(&self, user_id: &str, hive_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait HiveServiceTrait: Send + Sync {
    fn list_hives(&self, user_id: &str) -> Result<Vec<Hive>>;
    fn get_hive(&self, user_id: &str, hive_id: &str) -> Result<Hive>;
    async fn create_hive(&self, user_id: &str, new_hive: NewHive) -> Result<Hive>;
    async fn update_hive(&self, user_id: &str, hive_id: &str, changes: NewHive) -> Result<Hive>;
    async fn delete_hive(&self, user_id: &str, hive_id: &str) -> Result<()>;
}
