use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use studio_catalog_schema::class_templates;
use studio_core::sea_ext::{contains_ci, fetch_page};
use studio_domain::pagination::PageRequest;

use crate::domain::repository::ClassRepository;
use crate::domain::types::{ClassFilter, ClassTemplate, NewClass};
use crate::error::CatalogServiceError;

// ── Class repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassRepository {
    pub db: DatabaseConnection,
}

impl ClassRepository for DbClassRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClassTemplate>, CatalogServiceError> {
        let model = class_templates::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find class template")?;
        model.map(class_from_model).transpose()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<ClassTemplate>, CatalogServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = class_templates::Entity::find()
            .filter(class_templates::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find class templates by ids")?;
        models.into_iter().map(class_from_model).collect()
    }

    async fn list(
        &self,
        filter: &ClassFilter,
        page: PageRequest,
    ) -> Result<(Vec<ClassTemplate>, u64), CatalogServiceError> {
        let query = filtered(filter)
            .order_by_asc(class_templates::Column::Weekday)
            .order_by_asc(class_templates::Column::StartTime)
            .order_by_asc(class_templates::Column::Name)
            .order_by_asc(class_templates::Column::Id);
        let (models, total) = fetch_page(query, &self.db, page)
            .await
            .context("list class templates")?;
        let classes = models
            .into_iter()
            .map(class_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((classes, total))
    }

    async fn find_ids(&self, filter: &ClassFilter) -> Result<Vec<Uuid>, CatalogServiceError> {
        let ids = filtered(filter)
            .select_only()
            .column(class_templates::Column::Id)
            .order_by_asc(class_templates::Column::Id)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("find class template ids")?;
        Ok(ids)
    }

    async fn create(&self, class: NewClass) -> Result<ClassTemplate, CatalogServiceError> {
        let now = Utc::now();
        let model = class_templates::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(class.name),
            teacher: Set(class.teacher),
            weekday: Set(i16::from(class.weekday)),
            start_time: Set(class.start_time),
            capacity: Set(class.capacity as i32),
            comment: Set(class.comment),
            active: Set(class.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create class template")?;
        class_from_model(model)
    }

    async fn update(&self, class: &ClassTemplate) -> Result<bool, CatalogServiceError> {
        let result = class_templates::Entity::update_many()
            .set(class_templates::ActiveModel {
                name: Set(class.name.clone()),
                teacher: Set(class.teacher.clone()),
                weekday: Set(i16::from(class.weekday)),
                start_time: Set(class.start_time),
                capacity: Set(class.capacity as i32),
                comment: Set(class.comment.clone()),
                active: Set(class.active),
                updated_at: Set(class.updated_at),
                ..Default::default()
            })
            .filter(class_templates::Column::Id.eq(class.id))
            .exec(&self.db)
            .await
            .context("update class template")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError> {
        let result = class_templates::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete class template")?;
        Ok(result.rows_affected > 0)
    }

    async fn all(&self) -> Result<Vec<ClassTemplate>, CatalogServiceError> {
        let models = class_templates::Entity::find()
            .all(&self.db)
            .await
            .context("load all class templates")?;
        models.into_iter().map(class_from_model).collect()
    }
}

fn filtered(filter: &ClassFilter) -> Select<class_templates::Entity> {
    let mut query = class_templates::Entity::find();
    if let Some(teacher) = non_blank(filter.teacher.as_deref()) {
        query = query.filter(contains_ci(class_templates::Column::Teacher, teacher));
    }
    if let Some(name) = non_blank(filter.name.as_deref()) {
        query = query.filter(contains_ci(class_templates::Column::Name, name));
    }
    if let Some(weekday) = filter.weekday {
        query = query.filter(class_templates::Column::Weekday.eq(i16::from(weekday)));
    }
    if let Some(active) = filter.active {
        query = query.filter(class_templates::Column::Active.eq(active));
    }
    query
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn class_from_model(model: class_templates::Model) -> Result<ClassTemplate, CatalogServiceError> {
    let weekday = u8::try_from(model.weekday)
        .with_context(|| format!("class {} has weekday {}", model.id, model.weekday))?;
    let capacity = u32::try_from(model.capacity)
        .with_context(|| format!("class {} has capacity {}", model.id, model.capacity))?;
    Ok(ClassTemplate {
        id: model.id,
        name: model.name,
        teacher: model.teacher,
        weekday,
        start_time: model.start_time,
        capacity,
        comment: model.comment,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
