//! Shared fixtures for repository tests.

use std::sync::Arc;

use hivebook_core::users::{NewUser, User, UserRepositoryTrait};
use tempfile::TempDir;

use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::users::UserRepository;

/// Migrated database in a temp dir. Keep the `TempDir` alive for the test.
pub async fn setup_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone()).expect("Failed to start writer");
    (pool, writer, temp_dir)
}

pub async fn create_test_user(pool: &Arc<DbPool>, writer: &WriteHandle, external_id: &str) -> User {
    UserRepository::new(pool.clone(), writer.clone())
        .create_or_get(NewUser {
            external_id: external_id.to_string(),
            email: None,
            display_name: None,
        })
        .await
        .expect("Failed to create test user")
}
