use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use hivebook_core::hives::{Hive, HiveRepositoryTrait, NewHive};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{HiveChangesDB, HiveDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::hives;
use crate::utils::new_id;

pub struct HiveRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HiveRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HiveRepositoryTrait for HiveRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Hive>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = hives::table
            .filter(hives::user_id.eq(user_id))
            .order((hives::apiary.asc(), hives::name.asc()))
            .select(HiveDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Hive::from).collect())
    }

    fn get_by_id(&self, user_id: &str, hive_id: &str) -> Result<Hive> {
        let mut conn = get_connection(&self.pool)?;
        hives::table
            .filter(hives::id.eq(hive_id))
            .filter(hives::user_id.eq(user_id))
            .select(HiveDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Hive::from)
            .ok_or_else(|| Error::not_found("Hive", hive_id))
    }

    async fn create(&self, user_id: &str, new_hive: NewHive) -> Result<Hive> {
        let row = HiveDB::from_new(new_id(), user_id.to_string(), new_hive, now_naive());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(hives::table)
                    .values(&row)
                    .returning(HiveDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(Hive::from)
            })
            .await
    }

    async fn update(&self, user_id: &str, hive_id: &str, changes: NewHive) -> Result<Hive> {
        let changes = HiveChangesDB::from_new(changes, now_naive());
        let (user_id, hive_id) = (user_id.to_string(), hive_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    hives::table
                        .filter(hives::id.eq(hive_id.as_str()))
                        .filter(hives::user_id.eq(user_id.as_str())),
                )
                .set(&changes)
                .returning(HiveDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Hive::from)
                    .ok_or_else(|| Error::not_found("Hive", hive_id))
            })
            .await
    }

    async fn delete(&self, user_id: &str, hive_id: &str) -> Result<usize> {
        let (user_id, hive_id) = (user_id.to_string(), hive_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    hives::table
                        .filter(hives::id.eq(hive_id))
                        .filter(hives::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
