use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::UserId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::ClassId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::Date).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate guard: one seat per user per occurrence.
        manager
            .create_index(
                Index::create()
                    .name("uq_bookings_user_class_date")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .col(Bookings::ClassId)
                    .col(Bookings::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Occupancy count per occurrence.
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_class_date")
                    .table(Bookings::Table)
                    .col(Bookings::ClassId)
                    .col(Bookings::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_date")
                    .table(Bookings::Table)
                    .col(Bookings::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    UserId,
    ClassId,
    Date,
    CreatedAt,
}
