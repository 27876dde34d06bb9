use studio_auth_types::token::{IssuedToken, issue_access_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::normalize_email;
use crate::error::IdentityServiceError;
use crate::infra::password::verify_password;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
    pub access_ttl_secs: u64,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Unknown email and wrong password produce the same error.
    pub async fn execute(&self, input: LoginInput) -> Result<IssuedToken, IdentityServiceError> {
        let email = normalize_email(&input.email);
        let Some(user) = self.repo.find_by_email(&email).await? else {
            return Err(IdentityServiceError::InvalidCredentials);
        };
        if !verify_password(input.password, user.password_hash.clone()).await? {
            return Err(IdentityServiceError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(IdentityServiceError::AccountDisabled);
        }

        let issued = issue_access_token(user.id, user.role, &self.jwt_secret, self.access_ttl_secs)
            .map_err(|e| anyhow::anyhow!("sign access token: {e}"))?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(issued)
    }
}
