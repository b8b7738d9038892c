use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use hivebook_core::harvests::{Harvest, HarvestRepositoryTrait, NewHarvest};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{HarvestChangesDB, HarvestDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::harvests;
use crate::utils::new_id;

pub struct HarvestRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HarvestRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HarvestRepositoryTrait for HarvestRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Harvest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = harvests::table
            .filter(harvests::user_id.eq(user_id))
            .order((harvests::harvested_on.desc(), harvests::created_at.desc()))
            .select(HarvestDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Harvest::from).collect())
    }

    fn get_by_id(&self, user_id: &str, harvest_id: &str) -> Result<Harvest> {
        let mut conn = get_connection(&self.pool)?;
        harvests::table
            .filter(harvests::id.eq(harvest_id))
            .filter(harvests::user_id.eq(user_id))
            .select(HarvestDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Harvest::from)
            .ok_or_else(|| Error::not_found("Harvest", harvest_id))
    }

    async fn create(&self, user_id: &str, new_harvest: NewHarvest) -> Result<Harvest> {
        let row = HarvestDB::from_new(new_id(), user_id.to_string(), new_harvest, now_naive());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(harvests::table)
                    .values(&row)
                    .returning(HarvestDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(Harvest::from)
            })
            .await
    }

    async fn update(
        &self,
        user_id: &str,
        harvest_id: &str,
        changes: NewHarvest,
    ) -> Result<Harvest> {
        let changes = HarvestChangesDB::from_new(changes, now_naive());
        let (user_id, harvest_id) = (user_id.to_string(), harvest_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    harvests::table
                        .filter(harvests::id.eq(harvest_id.as_str()))
                        .filter(harvests::user_id.eq(user_id.as_str())),
                )
                .set(&changes)
                .returning(HarvestDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Harvest::from)
                    .ok_or_else(|| Error::not_found("Harvest", harvest_id))
            })
            .await
    }

    async fn delete(&self, user_id: &str, harvest_id: &str) -> Result<usize> {
        let (user_id, harvest_id) = (user_id.to_string(), harvest_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    harvests::table
                        .filter(harvests::id.eq(harvest_id))
                        .filter(harvests::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
