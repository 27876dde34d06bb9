use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClassTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassTemplates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassTemplates::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ClassTemplates::Teacher)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassTemplates::Weekday)
                            .small_integer()
                            .not_null()
                            .check(
                                Expr::col(ClassTemplates::Weekday)
                                    .gte(1)
                                    .and(Expr::col(ClassTemplates::Weekday).lte(7)),
                            ),
                    )
                    .col(ColumnDef::new(ClassTemplates::StartTime).time().not_null())
                    .col(
                        ColumnDef::new(ClassTemplates::Capacity)
                            .integer()
                            .not_null()
                            .check(Expr::col(ClassTemplates::Capacity).gt(0)),
                    )
                    .col(ColumnDef::new(ClassTemplates::Comment).string_len(500).null())
                    .col(
                        ColumnDef::new(ClassTemplates::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ClassTemplates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ClassTemplates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_templates_weekday_start_time")
                    .table(ClassTemplates::Table)
                    .col(ClassTemplates::Weekday)
                    .col(ClassTemplates::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_templates_active")
                    .table(ClassTemplates::Table)
                    .col(ClassTemplates::Active)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassTemplates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ClassTemplates {
    Table,
    Id,
    Name,
    Teacher,
    Weekday,
    StartTime,
    Capacity,
    Comment,
    Active,
    CreatedAt,
    UpdatedAt,
}
