use chrono::{DateTime, Utc};
use uuid::Uuid;

use studio_domain::user::UserRole;

use crate::error::IdentityServiceError;

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 128;

/// Account owned by the identity service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active_admin(&self) -> bool {
        self.is_active && self.role.is_admin()
    }
}

/// Admin user-list filters. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    /// Case-insensitive substring of email or name.
    pub search: Option<String>,
}

/// Admin mutation of another account's role and/or active flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleChange {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl RoleChange {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.is_active.is_none()
    }

    /// Whether applying this change to `target` takes away an active admin.
    pub fn removes_active_admin(&self, target: &User) -> bool {
        target.is_active_admin()
            && (self.role == Some(UserRole::User) || self.is_active == Some(false))
    }
}

/// Last-admin guard.
///
/// `active_admins` must be counted inside the same transaction that applies
/// the change.
pub fn check_role_change(
    actor_id: Uuid,
    target: &User,
    change: &RoleChange,
    active_admins: u64,
) -> Result<(), IdentityServiceError> {
    if !change.removes_active_admin(target) {
        return Ok(());
    }
    if actor_id == target.id {
        return Err(IdentityServiceError::SelfDemotion);
    }
    if active_admins <= 1 {
        return Err(IdentityServiceError::LastAdmin);
    }
    Ok(())
}

// ── Input validation ─────────────────────────────────────────────────────────

/// Trim and lower-case an email address for storage and lookup.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), IdentityServiceError> {
    let invalid = || IdentityServiceError::Validation("invalid email address".to_owned());
    if email.is_empty() || email.chars().count() > EMAIL_MAX_CHARS {
        return Err(invalid());
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels_ok = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    if !labels_ok {
        return Err(invalid());
    }
    Ok(())
}

/// Returns the trimmed name.
pub fn validate_name(raw: &str) -> Result<String, IdentityServiceError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX_CHARS {
        return Err(IdentityServiceError::Validation(format!(
            "name must be 1-{NAME_MAX_CHARS} characters"
        )));
    }
    Ok(name.to_owned())
}

/// At least one letter and one digit, 8-128 characters.
pub fn validate_password(password: &str) -> Result<(), IdentityServiceError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&len) {
        return Err(IdentityServiceError::Validation(format!(
            "password must be {PASSWORD_MIN_CHARS}-{PASSWORD_MAX_CHARS} characters"
        )));
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(IdentityServiceError::Validation(
            "password must contain letters and digits".to_owned(),
        ));
    }
    Ok(())
}
