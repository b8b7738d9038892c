use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use hivebook_core::inspections::{Inspection, InspectionRepositoryTrait, NewInspection};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{InspectionChangesDB, InspectionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::inspections;
use crate::utils::new_id;

pub struct InspectionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InspectionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl InspectionRepositoryTrait for InspectionRepository {
    fn list(&self, user_id: &str, hive_id: Option<&str>) -> Result<Vec<Inspection>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = inspections::table
            .filter(inspections::user_id.eq(user_id))
            .into_boxed();
        if let Some(hive_id) = hive_id {
            query = query.filter(inspections::hive_id.eq(hive_id));
        }
        let rows = query
            .order((
                inspections::inspected_on.desc(),
                inspections::created_at.desc(),
            ))
            .select(InspectionDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Inspection::from).collect())
    }

    fn get_by_id(&self, user_id: &str, inspection_id: &str) -> Result<Inspection> {
        let mut conn = get_connection(&self.pool)?;
        inspections::table
            .filter(inspections::id.eq(inspection_id))
            .filter(inspections::user_id.eq(user_id))
            .select(InspectionDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Inspection::from)
            .ok_or_else(|| Error::not_found("Inspection", inspection_id))
    }

    async fn create(&self, user_id: &str, new_inspection: NewInspection) -> Result<Inspection> {
        let row = InspectionDB::from_new(new_id(), user_id.to_string(), new_inspection, now_naive());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(inspections::table)
                    .values(&row)
                    .returning(InspectionDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(Inspection::from)
            })
            .await
    }

    async fn update(
        &self,
        user_id: &str,
        inspection_id: &str,
        changes: NewInspection,
    ) -> Result<Inspection> {
        let changes = InspectionChangesDB::from((changes, now_naive()));
        let (user_id, inspection_id) = (user_id.to_string(), inspection_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    inspections::table
                        .filter(inspections::id.eq(inspection_id.as_str()))
                        .filter(inspections::user_id.eq(user_id.as_str())),
                )
                .set(&changes)
                .returning(InspectionDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Inspection::from)
                    .ok_or_else(|| Error::not_found("Inspection", inspection_id))
            })
            .await
    }

    async fn delete(&self, user_id: &str, inspection_id: &str) -> Result<usize> {
        let (user_id, inspection_id) = (user_id.to_string(), inspection_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    inspections::table
                        .filter(inspections::id.eq(inspection_id))
                        .filter(inspections::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
