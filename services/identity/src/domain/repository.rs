#![allow(async_fn_in_trait)]

use uuid::Uuid;

use studio_domain::pagination::PageRequest;

use crate::domain::types::{RoleChange, User, UserFilter};
use crate::error::IdentityServiceError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError>;
    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError>;
    /// Insert a new account. `EmailTaken` when the email is registered.
    async fn create(&self, user: &User) -> Result<(), IdentityServiceError>;
    /// Returns the updated account, `None` if it does not exist.
    async fn update_name(
        &self,
        id: Uuid,
        name: &str,
    ) -> Result<Option<User>, IdentityServiceError>;
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError>;
    /// Returns one page of matching accounts plus the unpaged total.
    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), IdentityServiceError>;
    /// Apply `change` to `target_id` on behalf of `actor_id`.
    ///
    /// The active-admin count, [`crate::domain::types::check_role_change`] and
    /// the write run in one transaction with the admin rows locked, so two
    /// concurrent demotions cannot both pass a stale count.
    async fn change_role(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        change: RoleChange,
    ) -> Result<User, IdentityServiceError>;
    /// Make an existing account an active admin with fresh name and password.
    async fn promote_admin(
        &self,
        id: Uuid,
        name: &str,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError>;
}
