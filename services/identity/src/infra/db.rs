use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel as _, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionError, TransactionTrait,
};
use uuid::Uuid;

use studio_core::sea_ext::{contains_ci, fetch_page};
use studio_domain::pagination::PageRequest;
use studio_domain::user::UserRole;
use studio_identity_schema::users;

use crate::domain::repository::UserRepository;
use crate::domain::types::{RoleChange, User, UserFilter, check_role_change};
use crate::error::IdentityServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(IdentityServiceError::EmailTaken),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_name(
        &self,
        id: Uuid,
        name: &str,
    ) -> Result<Option<User>, IdentityServiceError> {
        let Some(model) = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for name update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        am.name = Set(name.to_owned());
        am.updated_at = Set(Utc::now());
        let updated = am.update(&self.db).await.context("update user name")?;
        user_from_model(updated).map(Some)
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), IdentityServiceError> {
        let mut query = users::Entity::find();
        if let Some(role) = filter.role {
            query = query.filter(users::Column::Role.eq(role.as_str()));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(users::Column::IsActive.eq(is_active));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(users::Column::Email, search))
                    .add(contains_ci(users::Column::Name, search)),
            );
        }
        let query = query
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id);
        let (models, total) = fetch_page(query, &self.db, page)
            .await
            .context("list users")?;
        let users = models
            .into_iter()
            .map(user_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((users, total))
    }

    async fn change_role(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        change: RoleChange,
    ) -> Result<User, IdentityServiceError> {
        self.db
            .transaction::<_, User, IdentityServiceError>(|txn| {
                Box::pin(async move {
                    // Lock the active admin set first, in id order, so
                    // concurrent role changes serialize on the same rows.
                    let active_admins = users::Entity::find()
                        .filter(users::Column::Role.eq(UserRole::Admin.as_str()))
                        .filter(users::Column::IsActive.eq(true))
                        .order_by_asc(users::Column::Id)
                        .lock_exclusive()
                        .all(txn)
                        .await
                        .context("lock active admins")?;

                    let model = users::Entity::find_by_id(target_id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .context("lock target user")?
                        .ok_or(IdentityServiceError::UserNotFound)?;

                    let target = user_from_model(model.clone())?;
                    check_role_change(actor_id, &target, &change, active_admins.len() as u64)?;

                    let mut am = model.into_active_model();
                    if let Some(role) = change.role {
                        am.role = Set(role.as_str().to_owned());
                    }
                    if let Some(is_active) = change.is_active {
                        am.is_active = Set(is_active);
                    }
                    am.updated_at = Set(Utc::now());
                    let updated = am.update(txn).await.context("apply role change")?;
                    user_from_model(updated)
                })
            })
            .await
            .map_err(from_transaction_error)
    }

    async fn promote_admin(
        &self,
        id: Uuid,
        name: &str,
        password_hash: &str,
    ) -> Result<(), IdentityServiceError> {
        users::ActiveModel {
            id: Set(id),
            name: Set(name.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            role: Set(UserRole::Admin.as_str().to_owned()),
            is_active: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("promote user to admin")?;
        Ok(())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn from_transaction_error(err: TransactionError<IdentityServiceError>) -> IdentityServiceError {
    match err {
        TransactionError::Connection(e) => {
            anyhow::Error::new(e).context("role change transaction").into()
        }
        TransactionError::Transaction(e) => e,
    }
}

fn user_from_model(model: users::Model) -> Result<User, IdentityServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has unknown role", model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        role,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
