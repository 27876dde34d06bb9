use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, Statement, TransactionError, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use studio_core::sea_ext::fetch_page;
use studio_domain::pagination::PageRequest;
use studio_reservation_schema::bookings;

use crate::domain::repository::BookingRepository;
use crate::domain::types::{
    Booking, BookingCounts, BookingFilter, ClassCount, Occupancy, StatisticsWindow,
    check_admission,
};
use crate::error::BookingServiceError;

// ── Booking repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookingRepository {
    pub db: DatabaseConnection,
}

impl BookingRepository for DbBookingRepository {
    async fn admit(&self, booking: &Booking, capacity: u32) -> Result<(), BookingServiceError> {
        let booking = booking.clone();
        self.db
            .transaction::<_, (), BookingServiceError>(|txn| {
                Box::pin(async move {
                    lock_occurrence(txn, booking.class_id, &booking.date.to_string()).await?;
                    let occupancy = occupancy(txn, &booking).await?;
                    check_admission(occupancy, capacity)?;

                    let inserted = bookings::ActiveModel {
                        id: Set(booking.id),
                        user_id: Set(booking.user_id),
                        class_id: Set(booking.class_id),
                        date: Set(booking.date),
                        created_at: Set(booking.created_at),
                    }
                    .insert(txn)
                    .await;
                    match inserted {
                        Ok(_) => Ok(()),
                        // Only reachable if the lock is bypassed; the index
                        // still has the final say.
                        Err(e) if is_unique_violation(&e) => Err(BookingServiceError::AlreadyBooked),
                        Err(e) => Err(anyhow::Error::new(e).context("insert booking").into()),
                    }
                })
            })
            .await
            .map_err(from_transaction_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingServiceError> {
        let model = bookings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find booking")?;
        Ok(model.map(booking_from_model))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BookingServiceError> {
        let result = bookings::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete booking")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> Result<(Vec<Booking>, u64), BookingServiceError> {
        let mut query = bookings::Entity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(bookings::Column::UserId.eq(user_id));
        }
        if let Some(class_ids) = &filter.class_ids {
            query = query.filter(bookings::Column::ClassId.is_in(class_ids.iter().copied()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(bookings::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(bookings::Column::Date.lte(to));
        }
        let query = query
            .order_by_asc(bookings::Column::Date)
            .order_by_asc(bookings::Column::CreatedAt)
            .order_by_asc(bookings::Column::Id);
        let (models, total) = fetch_page(query, &self.db, page)
            .await
            .context("list bookings")?;
        Ok((models.into_iter().map(booking_from_model).collect(), total))
    }

    async fn counts(&self, window: StatisticsWindow) -> Result<BookingCounts, BookingServiceError> {
        let total = bookings::Entity::find()
            .count(&self.db)
            .await
            .context("count bookings")?;
        let today = bookings::Entity::find()
            .filter(bookings::Column::Date.eq(window.today))
            .count(&self.db)
            .await
            .context("count bookings today")?;
        let this_week = bookings::Entity::find()
            .filter(bookings::Column::Date.between(window.week_start, window.week_end))
            .count(&self.db)
            .await
            .context("count bookings this week")?;
        let upcoming = bookings::Entity::find()
            .filter(bookings::Column::Date.gte(window.today))
            .count(&self.db)
            .await
            .context("count upcoming bookings")?;

        let top = bookings::Entity::find()
            .select_only()
            .column(bookings::Column::ClassId)
            .column_as(Expr::col(bookings::Column::Id).count(), "bookings")
            .group_by(bookings::Column::ClassId)
            .order_by(Expr::col(bookings::Column::Id).count(), Order::Desc)
            .order_by_asc(bookings::Column::ClassId)
            .limit(1)
            .into_tuple::<(Uuid, i64)>()
            .one(&self.db)
            .await
            .context("find most booked class")?;

        Ok(BookingCounts {
            total,
            today,
            this_week,
            upcoming,
            top_class: top.map(|(class_id, bookings)| ClassCount {
                class_id,
                bookings: bookings.max(0) as u64,
            }),
        })
    }
}

/// Serialize admissions for one class occurrence until the transaction ends.
async fn lock_occurrence(
    txn: &DatabaseTransaction,
    class_id: Uuid,
    date: &str,
) -> Result<(), BookingServiceError> {
    let key = format!("booking:{class_id}:{date}");
    txn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtextextended($1, 0))",
        [key.into()],
    ))
    .await
    .context("lock class occurrence")?;
    Ok(())
}

async fn occupancy(
    txn: &DatabaseTransaction,
    booking: &Booking,
) -> Result<Occupancy, BookingServiceError> {
    let same_occurrence = bookings::Entity::find()
        .filter(bookings::Column::ClassId.eq(booking.class_id))
        .filter(bookings::Column::Date.eq(booking.date));
    let booked = same_occurrence
        .clone()
        .count(txn)
        .await
        .context("count occurrence bookings")?;
    let own = same_occurrence
        .filter(bookings::Column::UserId.eq(booking.user_id))
        .count(txn)
        .await
        .context("check existing booking")?;
    Ok(Occupancy {
        booked,
        already_booked: own > 0,
    })
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn from_transaction_error(err: TransactionError<BookingServiceError>) -> BookingServiceError {
    match err {
        TransactionError::Connection(e) => {
            anyhow::Error::new(e).context("admission transaction").into()
        }
        TransactionError::Transaction(e) => e,
    }
}

fn booking_from_model(model: bookings::Model) -> Booking {
    Booking {
        id: model.id,
        user_id: model.user_id,
        class_id: model.class_id,
        date: model.date,
        created_at: model.created_at,
    }
}
