use chrono::Days;
use uuid::Uuid;

use studio_domain::schedule::week_bounds;
use studio_reservation::usecase::statistics::{BookingStatisticsUseCase, MISSING_CLASS_NAME};
use studio_testing::fixture::{today, weeks_after};

use crate::helpers::{MockBookingRepo, MockCatalog, test_booking, test_class};

#[tokio::test]
async fn should_count_by_window() {
    let class = test_class("Yoga", "Anna", 1, 10);
    let repo = MockBookingRepo::default();
    let now = today();
    let (week_start, _) = week_bounds(now);
    let last_week = week_start - Days::new(1);
    let next_week = weeks_after(now, 1);

    repo.seed(test_booking(Uuid::now_v7(), class.id, now)).await;
    repo.seed(test_booking(Uuid::now_v7(), class.id, week_start)).await;
    repo.seed(test_booking(Uuid::now_v7(), class.id, last_week)).await;
    repo.seed(test_booking(Uuid::now_v7(), class.id, next_week)).await;

    let usecase = BookingStatisticsUseCase {
        repo,
        catalog: MockCatalog::new(vec![class.clone()]),
    };
    let stats = usecase.execute(now).await.unwrap();
    // On a Monday the week start is today itself.
    let monday = week_start == now;
    assert_eq!(stats.total_bookings, 4);
    assert_eq!(stats.bookings_today, if monday { 2 } else { 1 });
    assert_eq!(stats.bookings_this_week, 2);
    assert_eq!(stats.upcoming_bookings, if monday { 3 } else { 2 });

    let top = stats.most_booked_class.unwrap();
    assert_eq!(top.class_id, class.id);
    assert_eq!(top.name, "Yoga");
    assert_eq!(top.bookings, 4);
}

#[tokio::test]
async fn should_break_ties_by_lowest_class_id() {
    let a = test_class("Aerobics", "Anna", 1, 10);
    let b = test_class("Boxing", "Boris", 1, 10);
    let (low, high) = if a.id < b.id { (a, b) } else { (b, a) };
    let repo = MockBookingRepo::default();
    let now = today();
    // Seed the higher id first so insertion order cannot decide.
    for class_id in [high.id, high.id, low.id, low.id] {
        repo.seed(test_booking(Uuid::now_v7(), class_id, now)).await;
    }

    let usecase = BookingStatisticsUseCase {
        repo,
        catalog: MockCatalog::new(vec![low.clone(), high.clone()]),
    };
    let top = usecase.execute(now).await.unwrap().most_booked_class.unwrap();
    assert_eq!(top.class_id, low.id);
    assert_eq!(top.bookings, 2);
}

#[tokio::test]
async fn should_report_no_top_class_without_bookings() {
    let usecase = BookingStatisticsUseCase {
        repo: MockBookingRepo::default(),
        catalog: MockCatalog::default(),
    };
    let stats = usecase.execute(today()).await.unwrap();
    assert_eq!(stats.total_bookings, 0);
    assert!(stats.most_booked_class.is_none());
}

#[tokio::test]
async fn should_use_placeholder_name_for_unresolvable_class() {
    let repo = MockBookingRepo::default();
    let class_id = Uuid::now_v7();
    repo.seed(test_booking(Uuid::now_v7(), class_id, today())).await;

    let deleted = BookingStatisticsUseCase {
        repo: repo.clone(),
        catalog: MockCatalog::default(),
    };
    let top = deleted.execute(today()).await.unwrap().most_booked_class.unwrap();
    assert_eq!(top.name, MISSING_CLASS_NAME);

    let unreachable = BookingStatisticsUseCase {
        repo,
        catalog: MockCatalog::unreachable(),
    };
    let top = unreachable
        .execute(today())
        .await
        .unwrap()
        .most_booked_class
        .unwrap();
    assert_eq!(top.class_id, class_id);
    assert_eq!(top.name, MISSING_CLASS_NAME);
}
