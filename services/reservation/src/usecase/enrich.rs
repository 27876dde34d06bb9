use std::collections::{BTreeSet, HashMap};

use futures::future::join_all;
use uuid::Uuid;

use crate::domain::repository::{CatalogPort, IdentityPort};
use crate::domain::types::{Booking, BookingView, ClassSnapshot, UserSnapshot};

/// Attach class and user details to `bookings`.
///
/// One bulk catalog lookup for all classes, one identity call per distinct
/// user. Any lookup failure leaves the affected details unresolved instead of
/// failing the read.
pub async fn enrich<C: CatalogPort, I: IdentityPort>(
    catalog: &C,
    identity: &I,
    bookings: Vec<Booking>,
) -> Vec<BookingView> {
    let class_ids: Vec<Uuid> = distinct(bookings.iter().map(|b| b.class_id));
    let user_ids: Vec<Uuid> = distinct(bookings.iter().map(|b| b.user_id));

    let classes = resolve_classes(catalog, &class_ids).await;
    let users = resolve_users(identity, &user_ids).await;

    bookings
        .into_iter()
        .map(|booking| BookingView {
            class: classes.get(&booking.class_id).cloned(),
            user: users.get(&booking.user_id).cloned(),
            booking,
        })
        .collect()
}

/// Enrich one booking whose class is already known.
pub async fn enrich_one<I: IdentityPort>(
    identity: &I,
    booking: Booking,
    class: Option<ClassSnapshot>,
) -> BookingView {
    let mut users = resolve_users(identity, &[booking.user_id]).await;
    BookingView {
        user: users.remove(&booking.user_id),
        class,
        booking,
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

async fn resolve_classes<C: CatalogPort>(
    catalog: &C,
    ids: &[Uuid],
) -> HashMap<Uuid, ClassSnapshot> {
    match catalog.lookup_classes(ids).await {
        Ok(classes) => classes.into_iter().map(|c| (c.id, c)).collect(),
        Err(e) => {
            tracing::warn!(error = ?e, count = ids.len(), "class lookup failed, using placeholders");
            HashMap::new()
        }
    }
}

async fn resolve_users<I: IdentityPort>(
    identity: &I,
    ids: &[Uuid],
) -> HashMap<Uuid, UserSnapshot> {
    let results = join_all(ids.iter().map(|&id| identity.get_user(id))).await;
    ids.iter()
        .zip(results)
        .filter_map(|(id, result)| match result {
            Ok(user) => user.map(|u| (*id, u)),
            Err(e) => {
                tracing::warn!(error = ?e, user_id = %id, "user lookup failed, using placeholder");
                None
            }
        })
        .collect()
}
