use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use hivebook_core::swarm_traps::{NewSwarmTrap, SwarmTrap, SwarmTrapRepositoryTrait};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{SwarmTrapChangesDB, SwarmTrapDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::swarm_traps;
use crate::utils::new_id;

pub struct SwarmTrapRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SwarmTrapRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SwarmTrapRepositoryTrait for SwarmTrapRepository {
    fn list(&self, user_id: &str) -> Result<Vec<SwarmTrap>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = swarm_traps::table
            .filter(swarm_traps::user_id.eq(user_id))
            .order(swarm_traps::installed_on.desc())
            .select(SwarmTrapDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(SwarmTrap::from).collect())
    }

    fn get_by_id(&self, user_id: &str, trap_id: &str) -> Result<SwarmTrap> {
        let mut conn = get_connection(&self.pool)?;
        swarm_traps::table
            .filter(swarm_traps::id.eq(trap_id))
            .filter(swarm_traps::user_id.eq(user_id))
            .select(SwarmTrapDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(SwarmTrap::from)
            .ok_or_else(|| Error::not_found("SwarmTrap", trap_id))
    }

    async fn create(&self, user_id: &str, new_trap: NewSwarmTrap) -> Result<SwarmTrap> {
        let row = SwarmTrapDB::from_new(new_id(), user_id.to_string(), new_trap, now_naive());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(swarm_traps::table)
                    .values(&row)
                    .returning(SwarmTrapDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(SwarmTrap::from)
            })
            .await
    }

    async fn update(
        &self,
        user_id: &str,
        trap_id: &str,
        changes: NewSwarmTrap,
    ) -> Result<SwarmTrap> {
        let changes = SwarmTrapChangesDB::from_new(changes, now_naive());
        let (user_id, trap_id) = (user_id.to_string(), trap_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    swarm_traps::table
                        .filter(swarm_traps::id.eq(trap_id.as_str()))
                        .filter(swarm_traps::user_id.eq(user_id.as_str())),
                )
                .set(&changes)
                .returning(SwarmTrapDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(SwarmTrap::from)
                    .ok_or_else(|| Error::not_found("SwarmTrap", trap_id))
            })
            .await
    }

    async fn delete(&self, user_id: &str, trap_id: &str) -> Result<usize> {
        let (user_id, trap_id) = (user_id.to_string(), trap_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    swarm_traps::table
                        .filter(swarm_traps::id.eq(trap_id))
                        .filter(swarm_traps::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
