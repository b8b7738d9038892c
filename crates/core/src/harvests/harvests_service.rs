use std::sync::Arc;

use async_trait::async_trait;

use super::harvests_model::{Harvest, NewHarvest};
use super::harvests_traits::{HarvestRepositoryTrait, HarvestServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::hives::HiveRepositoryTrait;

pub struct HarvestService {
    repository: Arc<dyn HarvestRepositoryTrait>,
    hive_repository: Arc<dyn HiveRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl HarvestService {
    pub fn new(
        repository: Arc<dyn HarvestRepositoryTrait>,
        hive_repository: Arc<dyn HiveRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            hive_repository,
            event_sink,
        }
    }

    fn check(&self, user_id: &str, harvest: &NewHarvest) -> Result<()> {
        harvest.validate()?;
        if let Some(hive_id) = harvest.hive_id.as_deref() {
            self.hive_repository.get_by_id(user_id, hive_id)?;
        }
        Ok(())
    }
}

#[async_trait]
impl HarvestServiceTrait for HarvestService {
    fn list_harvests(&self, user_id: &str) -> Result<Vec<Harvest>> {
        self.repository.list(user_id)
    }

    fn get_harvest(&self, user_id: &str, harvest_id: &str) -> Result<Harvest> {
        self.repository.get_by_id(user_id, harvest_id)
    }

    async fn create_harvest(&self, user_id: &str, new_harvest: NewHarvest) -> Result<Harvest> {
        self.check(user_id, &new_harvest)?;
        let harvest = self.repository.create(user_id, new_harvest).await?;
        self.event_sink.emit(DomainEvent::harvests_changed(user_id));
        Ok(harvest)
    }

    async fn update_harvest(
        &self,
        user_id: &str,
        harvest_id: &str,
        changes: NewHarvest,
    ) -> Result<Harvest> {
        self.check(user_id, &changes)?;
        let harvest = self.repository.update(user_id, harvest_id, changes).await?;
        self.event_sink.emit(DomainEvent::harvests_changed(user_id));
        Ok(harvest)
    }

    async fn delete_harvest(&self, user_id: &str, harvest_id: &str) -> Result<()> {
        if self.repository.delete(user_id, harvest_id).await? == 0 {
            return Err(Error::not_found("Harvest", harvest_id));
        }
        self.event_sink.emit(DomainEvent::harvests_changed(user_id));
        Ok(())
    }
}
