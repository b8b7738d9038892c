use std::sync::Arc;

use async_trait::async_trait;

use super::inspections_model::{Inspection, NewInspection};
use super::inspections_traits::{InspectionRepositoryTrait, InspectionServiceTrait};
use crate::errors::{Error, Result};
use crate::hives::HiveRepositoryTrait;

pub struct InspectionService {
    repository: Arc<dyn InspectionRepositoryTrait>,
    hive_repository: Arc<dyn HiveRepositoryTrait>,
}

impl InspectionService {
    pub fn new(
        repository: Arc<dyn InspectionRepositoryTrait>,
        hive_repository: Arc<dyn HiveRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            hive_repository,
        }
    }

    /// Inspections may only reference the caller's own hives.
    fn ensure_hive_owned(&self, user_id: &str, hive_id: &str) -> Result<()> {
        self.hive_repository.get_by_id(user_id, hive_id).map(|_| ())
    }
}

#[async_trait]
impl InspectionServiceTrait for InspectionService {
    fn list_inspections(&self, user_id: &str, hive_id: Option<&str>) -> Result<Vec<Inspection>> {
        if let Some(hive_id) = hive_id {
            self.ensure_hive_owned(user_id, hive_id)?;
        }
        self.repository.list(user_id, hive_id)
    }

    fn get_inspection(&self, user_id: &str, inspection_id: &str) -> Result<Inspection> {
        self.repository.get_by_id(user_id, inspection_id)
    }

    async fn create_inspection(
        &self,
        user_id: &str,
        new_inspection: NewInspection,
    ) -> Result<Inspection> {
        new_inspection.validate()?;
        self.ensure_hive_owned(user_id, &new_inspection.hive_id)?;
        self.repository.create(user_id, new_inspection).await
    }

    async fn update_inspection(
        &self,
        user_id: &str,
        inspection_id: &str,
        changes: NewInspection,
    ) -> Result<Inspection> {
        changes.validate()?;
        self.ensure_hive_owned(user_id, &changes.hive_id)?;
        self.repository.update(user_id, inspection_id, changes).await
    }

    async fn delete_inspection(&self, user_id: &str, inspection_id: &str) -> Result<()> {
        match self.repository.delete(user_id, inspection_id).await? {
            0 => Err(Error::not_found("Inspection", inspection_id)),
            _ => Ok(()),
        }
    }
}
