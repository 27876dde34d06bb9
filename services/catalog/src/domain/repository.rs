#![allow(async_fn_in_trait)]

use uuid::Uuid;

use studio_domain::pagination::PageRequest;

use crate::domain::types::{ClassFilter, ClassTemplate, NewClass};
use crate::error::CatalogServiceError;

/// Repository for class templates.
pub trait ClassRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClassTemplate>, CatalogServiceError>;
    /// Templates among `ids` that exist, in no particular order.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<ClassTemplate>, CatalogServiceError>;
    /// One page ordered by weekday, start time, name; plus the unpaged total.
    async fn list(
        &self,
        filter: &ClassFilter,
        page: PageRequest,
    ) -> Result<(Vec<ClassTemplate>, u64), CatalogServiceError>;
    /// Ids of every template matching `filter`.
    async fn find_ids(&self, filter: &ClassFilter) -> Result<Vec<Uuid>, CatalogServiceError>;
    async fn create(&self, class: NewClass) -> Result<ClassTemplate, CatalogServiceError>;
    /// Persist every field of `class`. `false` if the row no longer exists.
    async fn update(&self, class: &ClassTemplate) -> Result<bool, CatalogServiceError>;
    /// `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError>;
    async fn all(&self) -> Result<Vec<ClassTemplate>, CatalogServiceError>;
}
