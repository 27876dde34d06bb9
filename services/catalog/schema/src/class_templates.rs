use sea_orm::entity::prelude::*;

/// Recurring weekly class slot.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "class_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub teacher: String,
    /// ISO weekday, 1 = Monday .. 7 = Sunday.
    pub weekday: i16,
    pub start_time: chrono::NaiveTime,
    pub capacity: i32,
    pub comment: Option<String>,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
