use futures::future::join_all;

use studio_domain::pagination::PageRequest;
use studio_domain::user::UserRole;
use studio_identity::domain::types::{RoleChange, UserFilter};
use studio_identity::error::IdentityServiceError;
use studio_identity::usecase::admin::{ChangeRoleUseCase, ListUsersUseCase};

use crate::helpers::{MockUserRepo, test_user};

const DEMOTE: RoleChange = RoleChange {
    role: Some(UserRole::User),
    is_active: None,
};

// ── ChangeRoleUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_empty_change() {
    let admin = test_user("admin@example.com", UserRole::Admin);
    let repo = MockUserRepo::new(vec![admin.clone()]);
    let result = ChangeRoleUseCase { repo }
        .execute(admin.id, admin.id, RoleChange::default())
        .await;
    assert!(matches!(result, Err(IdentityServiceError::MissingData)));
}

#[tokio::test]
async fn should_promote_and_demote_other_users() {
    let admin = test_user("admin@example.com", UserRole::Admin);
    let member = test_user("member@example.com", UserRole::User);
    let repo = MockUserRepo::new(vec![admin.clone(), member.clone()]);
    let usecase = ChangeRoleUseCase { repo: repo.clone() };

    let promoted = usecase
        .execute(
            admin.id,
            member.id,
            RoleChange {
                role: Some(UserRole::Admin),
                is_active: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(promoted.role, UserRole::Admin);

    // Two active admins now, so either may be demoted by the other.
    let demoted = usecase.execute(member.id, admin.id, DEMOTE).await.unwrap();
    assert_eq!(demoted.role, UserRole::User);
}

#[tokio::test]
async fn should_reject_self_demotion() {
    let admin = test_user("admin@example.com", UserRole::Admin);
    let other = test_user("other@example.com", UserRole::Admin);
    let repo = MockUserRepo::new(vec![admin.clone(), other]);
    let result = ChangeRoleUseCase { repo }
        .execute(admin.id, admin.id, DEMOTE)
        .await;
    assert!(matches!(result, Err(IdentityServiceError::SelfDemotion)));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_target() {
    let admin = test_user("admin@example.com", UserRole::Admin);
    let repo = MockUserRepo::new(vec![admin.clone()]);
    let result = ChangeRoleUseCase { repo }
        .execute(admin.id, uuid::Uuid::now_v7(), DEMOTE)
        .await;
    assert!(matches!(result, Err(IdentityServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_keep_one_admin_under_concurrent_mutual_demotion() {
    let a = test_user("a@example.com", UserRole::Admin);
    let b = test_user("b@example.com", UserRole::Admin);
    let repo = MockUserRepo::new(vec![a.clone(), b.clone()]);
    let usecase = ChangeRoleUseCase { repo: repo.clone() };

    let results = join_all([
        usecase.execute(a.id, b.id, DEMOTE),
        usecase.execute(b.id, a.id, DEMOTE),
    ])
    .await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let last_admin = results
        .iter()
        .filter(|r| matches!(r, Err(IdentityServiceError::LastAdmin)))
        .count();
    assert_eq!(succeeded, 1);
    assert_eq!(last_admin, 1);

    let remaining = repo
        .users
        .lock()
        .unwrap()
        .iter()
        .filter(|u| u.is_active_admin())
        .count();
    assert_eq!(remaining, 1);
}

#[tokio::test]
async fn should_treat_deactivation_like_demotion() {
    let admin = test_user("admin@example.com", UserRole::Admin);
    let actor = test_user("actor@example.com", UserRole::Admin);
    let repo = MockUserRepo::new(vec![admin.clone(), actor.clone()]);
    // Actor deactivated by a previous change, leaving `admin` as the only
    // active admin.
    repo.users.lock().unwrap()[1].is_active = false;

    let result = ChangeRoleUseCase { repo }
        .execute(
            actor.id,
            admin.id,
            RoleChange {
                role: None,
                is_active: Some(false),
            },
        )
        .await;
    assert!(matches!(result, Err(IdentityServiceError::LastAdmin)));
}

// ── ListUsersUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_and_paginate_users() {
    let mut users = vec![test_user("admin@example.com", UserRole::Admin)];
    for i in 0..5 {
        users.push(test_user(&format!("member{i}@example.com"), UserRole::User));
    }
    let repo = MockUserRepo::new(users);
    let usecase = ListUsersUseCase { repo };

    let page = usecase
        .execute(
            UserFilter {
                role: Some(UserRole::User),
                ..Default::default()
            },
            PageRequest::new(Some(2), Some(2)),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.pages, 3);

    let page = usecase
        .execute(
            UserFilter {
                search: Some("MEMBER3".into()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].email, "member3@example.com");
}
