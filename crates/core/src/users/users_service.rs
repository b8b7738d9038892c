use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::users_model::{AuthIdentity, NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn resolve(&self, identity: AuthIdentity) -> Result<User> {
        let new_user = NewUser::from(identity);
        new_user.validate()?;

        let Some(existing) = self.repository.find_by_external_id(&new_user.external_id)? else {
            info!("Creating local user for external id {}", new_user.external_id);
            return self.repository.create_or_get(new_user).await;
        };

        // Claims only ever fill in or refresh the profile, never blank it.
        let email = new_user.email.or_else(|| existing.email.clone());
        let display_name = new_user
            .display_name
            .or_else(|| existing.display_name.clone());
        if email == existing.email && display_name == existing.display_name {
            return Ok(existing);
        }

        debug!("Refreshing profile of user {}", existing.id);
        self.repository
            .update_profile(&existing.id, email, display_name)
            .await
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::utils::now_naive;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<Vec<User>>,
        updates: Mutex<usize>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.external_id == external_id)
                .cloned())
        }

        fn get_by_id(&self, user_id: &str) -> Result<User> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned()
                .ok_or_else(|| Error::not_found("User", user_id))
        }

        async fn create_or_get(&self, new_user: NewUser) -> Result<User> {
            let mut users = self.users.lock().unwrap();
            let user = User {
                id: format!("user-{}", users.len() + 1),
                external_id: new_user.external_id,
                email: new_user.email,
                display_name: new_user.display_name,
                created_at: now_naive(),
                updated_at: now_naive(),
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn update_profile(
            &self,
            user_id: &str,
            email: Option<String>,
            display_name: Option<String>,
        ) -> Result<User> {
            *self.updates.lock().unwrap() += 1;
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| Error::not_found("User", user_id))?;
            user.email = email;
            user.display_name = display_name;
            Ok(user.clone())
        }
    }

    #[tokio::test]
    async fn test_resolve_creates_once() {
        let repo = Arc::new(MockUserRepository::default());
        let service = UserService::new(repo.clone());

        let first = service.resolve(AuthIdentity::new("auth0|abc")).await.unwrap();
        let second = service.resolve(AuthIdentity::new("auth0|abc")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.users.lock().unwrap().len(), 1);
        assert_eq!(*repo.updates.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_resolve_refreshes_profile_without_blanking() {
        let repo = Arc::new(MockUserRepository::default());
        let service = UserService::new(repo.clone());

        let mut identity = AuthIdentity::new("auth0|abc");
        identity.email = Some("keeper@example.com".to_string());
        service.resolve(identity).await.unwrap();

        let mut renamed = AuthIdentity::new("auth0|abc");
        renamed.display_name = Some("Ada".to_string());
        let user = service.resolve(renamed).await.unwrap();

        assert_eq!(user.email.as_deref(), Some("keeper@example.com"));
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
        assert_eq!(*repo.updates.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolve_rejects_blank_identity() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let err = service.resolve(AuthIdentity::new("   ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
