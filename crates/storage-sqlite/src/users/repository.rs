use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use hivebook_core::users::{NewUser, User, UserRepositoryTrait};
use hivebook_core::utils::now_naive;
use hivebook_core::{Error, Result};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::utils::new_id;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_external(conn: &mut SqliteConnection, external_id: &str) -> Result<Option<UserDB>> {
    users::table
        .filter(users::external_id.eq(external_id))
        .select(UserDB::as_select())
        .first(conn)
        .optional()
        .into_core()
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_external(&mut conn, external_id)?.map(User::from))
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::from)
            .ok_or_else(|| Error::not_found("User", user_id))
    }

    async fn create_or_get(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn| {
                // Two first requests of the same identity race here; the
                // writer serializes them and the second sees the first row.
                if let Some(existing) = find_external(conn, &new_user.external_id)? {
                    return Ok(User::from(existing));
                }
                let now = now_naive();
                let row = UserDB {
                    id: new_id(),
                    external_id: new_user.external_id,
                    email: new_user.email,
                    display_name: new_user.display_name,
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()
                    .map(User::from)
            })
            .await
    }

    async fn update_profile(
        &self,
        user_id: &str,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(users::table.find(user_id.as_str()))
                    .set((
                        users::email.eq(email),
                        users::display_name.eq(display_name),
                        users::updated_at.eq(now_naive()),
                    ))
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?;
                updated
                    .map(User::from)
                    .ok_or_else(|| Error::not_found("User", user_id))
            })
            .await
    }
}
