use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use studio_domain::pagination::PageRequest;
use studio_domain::user::UserRole;
use studio_identity::domain::repository::UserRepository;
use studio_identity::domain::types::{RoleChange, User, UserFilter, check_role_change};
use studio_identity::error::IdentityServiceError;

pub const TEST_JWT_SECRET: &str = "identity-test-secret";

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// In-memory accounts. Cloning shares the underlying list, so concurrent
/// use cases observe each other's writes.
#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(IdentityServiceError::EmailTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_name(
        &self,
        id: Uuid,
        name: &str,
    ) -> Result<Option<User>, IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.name = name.to_owned();
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), IdentityServiceError> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let users = self.users.lock().unwrap();
        let matching: Vec<User> = users
            .iter()
            .filter(|u| filter.role.is_none_or(|r| u.role == r))
            .filter(|u| filter.is_active.is_none_or(|a| u.is_active == a))
            .filter(|u| {
                search.as_deref().is_none_or(|s| {
                    u.email.to_lowercase().contains(s) || u.name.to_lowercase().contains(s)
                })
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();
        Ok((items, total))
    }

    async fn change_role(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        change: RoleChange,
    ) -> Result<User, IdentityServiceError> {
        // Count, check and write under one lock, like the row locks in the
        // database implementation.
        let mut users = self.users.lock().unwrap();
        let active_admins = users.iter().filter(|u| u.is_active_admin()).count() as u64;
        let target = users
            .iter_mut()
            .find(|u| u.id == target_id)
            .ok_or(IdentityServiceError::UserNotFound)?;
        check_role_change(actor_id, target, &change, active_admins)?;
        if let Some(role) = change.role {
            target.role = role;
        }
        if let Some(is_active) = change.is_active {
            target.is_active = is_active;
        }
        target.updated_at = Utc::now();
        Ok(target.clone())
    }

    async fn promote_admin(
        &self,
        id: Uuid,
        name: &str,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.name = name.to_owned();
            u.password_hash = password_hash.to_owned();
            u.role = UserRole::Admin;
            u.is_active = true;
        }
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(email: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        name: email.split('@').next().unwrap_or("user").to_owned(),
        password_hash: String::new(),
        role,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
