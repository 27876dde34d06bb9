use chrono::Utc;
use uuid::Uuid;

use studio_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    User, normalize_email, validate_email, validate_name, validate_password,
};
use crate::error::IdentityServiceError;
use crate::infra::password::{hash_password, verify_password};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, IdentityServiceError> {
        let email = normalize_email(&input.email);
        validate_email(&email)?;
        let name = validate_name(&input.name)?;
        validate_password(&input.password)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(IdentityServiceError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            name,
            password_hash: hash_password(input.password).await?,
            role: UserRole::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        // The unique index still decides a race between two registrations.
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, IdentityServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, IdentityServiceError> {
        let Some(raw_name) = input.name else {
            return Err(IdentityServiceError::MissingData);
        };
        let name = validate_name(&raw_name)?;
        self.repo
            .update_name(user_id, &name)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ChangePasswordUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: ChangePasswordInput,
    ) -> Result<(), IdentityServiceError> {
        validate_password(&input.new_password)?;
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;
        if !verify_password(input.current_password, user.password_hash).await? {
            return Err(IdentityServiceError::WrongPassword);
        }
        let hash = hash_password(input.new_password).await?;
        self.repo.update_password_hash(user_id, &hash).await?;
        tracing::info!(user_id = %user_id, "password changed");
        Ok(())
    }
}
