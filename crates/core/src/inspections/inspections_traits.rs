use async_trait::async_trait;

use super::inspections_model::{Inspection, NewInspection};
use crate::errors::Result;

#[async_trait]
pub trait InspectionRepositoryTrait: Send + Sync {
    /// Newest first; `hive_id` narrows the list to one hive.
    fn list(&self, user_id: &str, hive_id: Option<&str>) -> Result<Vec<Inspection>>;
    fn get_by_id(&self, user_id: &str, inspection_id: &str) -> Result<Inspection>;
    async fn create(&self, user_id: &str, new_inspection: NewInspection) -> Result<Inspection>;
    async fn update(
        &self,
        user_id: &str,
        inspection_id: &str,
        changes: NewInspection,
    ) -> Result<Inspection>;
    async fn delete(&self, user_id: &str, inspection_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait InspectionServiceTrait: Send + Sync {
    fn list_inspections(&self, user_id: &str, hive_id: Option<&str>) -> Result<Vec<Inspection>>;
    fn get_inspection(&self, user_id: &str, inspection_id: &str) -> Result<Inspection>;
    async fn create_inspection(
        &self,
        user_id: &str,
        new_inspection: NewInspection,
    ) -> Result<Inspection>;
    async fn update_inspection(
        &self,
        user_id: &str,
        inspection_id: &str,
        changes: NewInspection,
    ) -> Result<Inspection>;
    async fn delete_inspection(&self, user_id: &str, inspection_id: &str) -> Result<()>;
}
