//! Users module - local user rows mapped from external auth identities.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{AuthIdentity, NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
