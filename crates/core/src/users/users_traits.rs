use async_trait::async_trait;

use super::users_model::{AuthIdentity, NewUser, User};
use crate::errors::Result;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>>;
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    /// Inserts the user, or returns the existing row for the same external id.
    async fn create_or_get(&self, new_user: NewUser) -> Result<User>;
    async fn update_profile(
        &self,
        user_id: &str,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Result<User>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Maps an external auth identity to the local user, creating it on first sight.
    async fn resolve(&self, identity: AuthIdentity) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
}
