use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use hivebook_core::inventory::{InventoryItem, InventoryRepositoryTrait, NewInventoryItem};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::{InventoryItemChangesDB, InventoryItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::inventory_items;
use crate::utils::new_id;

pub struct InventoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InventoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl InventoryRepositoryTrait for InventoryRepository {
    fn list(&self, user_id: &str) -> Result<Vec<InventoryItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = inventory_items::table
            .filter(inventory_items::user_id.eq(user_id))
            .order(inventory_items::name.asc())
            .select(InventoryItemDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    fn get_by_id(&self, user_id: &str, item_id: &str) -> Result<InventoryItem> {
        let mut conn = get_connection(&self.pool)?;
        inventory_items::table
            .filter(inventory_items::id.eq(item_id))
            .filter(inventory_items::user_id.eq(user_id))
            .select(InventoryItemDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(InventoryItem::from)
            .ok_or_else(|| Error::not_found("InventoryItem", item_id))
    }

    async fn create(&self, user_id: &str, new_item: NewInventoryItem) -> Result<InventoryItem> {
        let row = InventoryItemDB::from_new(new_id(), user_id.to_string(), new_item, now_naive());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(inventory_items::table)
                    .values(&row)
                    .returning(InventoryItemDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(InventoryItem::from)
            })
            .await
    }

    async fn update(
        &self,
        user_id: &str,
        item_id: &str,
        changes: NewInventoryItem,
    ) -> Result<InventoryItem> {
        let changes = InventoryItemChangesDB::from_new(changes, now_naive());
        let (user_id, item_id) = (user_id.to_string(), item_id.to_string());
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(
                    inventory_items::table
                        .filter(inventory_items::id.eq(item_id.as_str()))
                        .filter(inventory_items::user_id.eq(user_id.as_str())),
                )
                .set(&changes)
                .returning(InventoryItemDB::as_returning())
                .get_result(conn)
                .optional()
                .into_core()?;
                updated
                    .map(InventoryItem::from)
                    .ok_or_else(|| Error::not_found("InventoryItem", item_id))
            })
            .await
    }

    async fn delete(&self, user_id: &str, item_id: &str) -> Result<usize> {
        let (user_id, item_id) = (user_id.to_string(), item_id.to_string());
        self.writer
            .exec(move |conn| {
                diesel::delete(
                    inventory_items::table
                        .filter(inventory_items::id.eq(item_id))
                        .filter(inventory_items::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
