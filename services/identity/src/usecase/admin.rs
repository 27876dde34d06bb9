use chrono::Utc;
use uuid::Uuid;

use studio_domain::pagination::{Page, PageRequest};
use studio_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    RoleChange, User, UserFilter, normalize_email, validate_email, validate_name,
    validate_password,
};
use crate::error::IdentityServiceError;
use crate::infra::password::hash_password;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Page<User>, IdentityServiceError> {
        let page = page.clamped();
        let (users, total) = self.repo.list(&filter, page).await?;
        Ok(Page::new(users, total, page))
    }
}

// ── ChangeRole ───────────────────────────────────────────────────────────────

pub struct ChangeRoleUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ChangeRoleUseCase<R> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        change: RoleChange,
    ) -> Result<User, IdentityServiceError> {
        if change.is_empty() {
            return Err(IdentityServiceError::MissingData);
        }
        let user = self.repo.change_role(actor_id, target_id, change).await?;
        tracing::info!(
            actor_id = %actor_id,
            target_id = %target_id,
            role = %user.role,
            is_active = user.is_active,
            "user role changed"
        );
        Ok(user)
    }
}

// ── EnsureAdmin ──────────────────────────────────────────────────────────────

pub struct EnsureAdminInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Whether [`EnsureAdminUseCase`] created a new account or promoted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureAdminOutcome {
    Created,
    Promoted,
}

/// Create the admin account, or promote and reset an existing one.
pub struct EnsureAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> EnsureAdminUseCase<R> {
    pub async fn execute(
        &self,
        input: EnsureAdminInput,
    ) -> Result<(Uuid, EnsureAdminOutcome), IdentityServiceError> {
        let email = normalize_email(&input.email);
        validate_email(&email)?;
        let name = validate_name(&input.name)?;
        validate_password(&input.password)?;
        let password_hash = hash_password(input.password).await?;

        if let Some(existing) = self.repo.find_by_email(&email).await? {
            self.repo
                .promote_admin(existing.id, &name, &password_hash)
                .await?;
            tracing::info!(user_id = %existing.id, "existing account promoted to admin");
            return Ok((existing.id, EnsureAdminOutcome::Promoted));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            name,
            password_hash,
            role: UserRole::Admin,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "admin account created");
        Ok((user.id, EnsureAdminOutcome::Created))
    }
}
