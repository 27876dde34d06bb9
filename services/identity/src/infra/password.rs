use anyhow::Context as _;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::IdentityServiceError;

/// Hash a password with Argon2id into a PHC string.
///
/// Runs on the blocking pool; hashing is deliberately CPU-expensive.
pub async fn hash_password(plain: String) -> Result<String, IdentityServiceError> {
    let hash = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
    })
    .await
    .context("join password hashing task")?
    .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash)
}

/// Check `plain` against a stored PHC string.
pub async fn verify_password(plain: String, hashed: String) -> Result<bool, IdentityServiceError> {
    let ok = tokio::task::spawn_blocking(move || -> Result<bool, String> {
        let parsed = PasswordHash::new(&hashed).map_err(|e| e.to_string())?;
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .context("join password verification task")?
    .map_err(|e| anyhow::anyhow!("parse stored password hash: {e}"))?;
    Ok(ok)
}
