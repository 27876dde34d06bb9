use studio_catalog::domain::types::{ClassFilter, ClassPatch};
use studio_catalog::error::CatalogServiceError;
use studio_catalog::usecase::class::{
    CatalogStatisticsUseCase, CreateClassUseCase, DeleteClassUseCase, GetClassUseCase,
    ListClassesUseCase, UpdateClassUseCase,
};
use studio_domain::pagination::PageRequest;

use crate::helpers::{MockClassRepo, at, new_class, test_class};

fn seeded() -> MockClassRepo {
    let mut inactive = test_class("Old Pilates", "Boris", 2, at(10, 0));
    inactive.active = false;
    MockClassRepo::new(vec![
        test_class("Evening Yoga", "Anna Petrova", 1, at(19, 0)),
        test_class("Morning Yoga", "Anna Petrova", 1, at(8, 0)),
        test_class("Boxing", "Boris", 3, at(18, 0)),
        test_class("Aerobics", "Carla", 1, at(8, 0)),
        inactive,
    ])
}

// ── ListClassesUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_order_by_weekday_time_and_name() {
    let usecase = ListClassesUseCase { repo: seeded() };
    let page = usecase
        .execute(
            ClassFilter {
                active: Some(true),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Aerobics", "Morning Yoga", "Evening Yoga", "Boxing"]);
    assert_eq!(page.total, 4);
    assert_eq!(page.pages, 1);
}

#[tokio::test]
async fn should_filter_by_partial_teacher_case_insensitively() {
    let usecase = ListClassesUseCase { repo: seeded() };
    let page = usecase
        .execute(
            ClassFilter {
                teacher: Some("petROVA".into()),
                active: Some(true),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|c| c.teacher == "Anna Petrova"));
}

#[tokio::test]
async fn should_reject_out_of_range_weekday() {
    let usecase = ListClassesUseCase { repo: seeded() };
    let result = usecase
        .execute(
            ClassFilter {
                weekday: Some(8),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await;
    assert!(matches!(result, Err(CatalogServiceError::Validation(_))));
}

#[tokio::test]
async fn should_paginate_with_clamped_size() {
    let usecase = ListClassesUseCase { repo: seeded() };
    let page = usecase
        .execute(ClassFilter::default(), PageRequest::new(Some(3), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.pages, 3);
    assert_eq!(page.items.len(), 1);
}

// ── Create / Update / Delete ─────────────────────────────────────────────────

#[tokio::test]
async fn should_create_and_fetch_class() {
    let repo = MockClassRepo::default();
    let created = CreateClassUseCase { repo: repo.clone() }
        .execute(new_class("Stretching", "Dana", 5, 15))
        .await
        .unwrap();
    let fetched = GetClassUseCase { repo }.execute(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn should_reject_invalid_class_without_storing() {
    let repo = MockClassRepo::default();
    let result = CreateClassUseCase { repo: repo.clone() }
        .execute(new_class("Stretching", "Dana", 5, 0))
        .await;
    assert!(matches!(result, Err(CatalogServiceError::Validation(_))));
    assert!(repo.classes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_update_only_given_fields() {
    let class = test_class("Boxing", "Boris", 3, at(18, 0));
    let repo = MockClassRepo::new(vec![class.clone()]);
    let updated = UpdateClassUseCase { repo }
        .execute(
            class.id,
            ClassPatch {
                capacity: Some(25),
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.capacity, 25);
    assert!(!updated.active);
    assert_eq!(updated.name, "Boxing");
    assert!(updated.updated_at >= class.updated_at);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let class = test_class("Boxing", "Boris", 3, at(18, 0));
    let repo = MockClassRepo::new(vec![class.clone()]);
    let result = UpdateClassUseCase { repo }
        .execute(class.id, ClassPatch::default())
        .await;
    assert!(matches!(result, Err(CatalogServiceError::MissingData)));
}

#[tokio::test]
async fn should_return_not_found_for_missing_class() {
    let repo = MockClassRepo::default();
    let id = uuid::Uuid::now_v7();
    let update = UpdateClassUseCase { repo: repo.clone() }
        .execute(
            id,
            ClassPatch {
                capacity: Some(5),
                ..Default::default()
            },
        )
        .await;
    let delete = DeleteClassUseCase { repo: repo.clone() }.execute(id).await;
    let get = GetClassUseCase { repo }.execute(id).await;
    assert!(matches!(update, Err(CatalogServiceError::ClassNotFound)));
    assert!(matches!(delete, Err(CatalogServiceError::ClassNotFound)));
    assert!(matches!(get, Err(CatalogServiceError::ClassNotFound)));
}

#[tokio::test]
async fn should_delete_physically() {
    let class = test_class("Boxing", "Boris", 3, at(18, 0));
    let repo = MockClassRepo::new(vec![class.clone()]);
    DeleteClassUseCase { repo: repo.clone() }
        .execute(class.id)
        .await
        .unwrap();
    assert!(repo.classes.lock().unwrap().is_empty());
}

// ── Statistics ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_compute_catalog_statistics() {
    let stats = CatalogStatisticsUseCase { repo: seeded() }
        .execute()
        .await
        .unwrap();
    assert_eq!(stats.total_classes, 5);
    assert_eq!(stats.active_classes, 4);
    assert_eq!(stats.inactive_classes, 1);
    assert_eq!(stats.distinct_teachers, 3);
    assert_eq!(stats.total_active_capacity, 40);
    assert_eq!(stats.by_weekday[0].classes, 3);
    assert_eq!(stats.by_weekday[1].classes, 0);
}
