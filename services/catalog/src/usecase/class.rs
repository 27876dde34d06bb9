use chrono::Utc;
use uuid::Uuid;

use studio_domain::pagination::{Page, PageRequest};

use crate::domain::repository::ClassRepository;
use crate::domain::types::{CatalogStatistics, ClassFilter, ClassPatch, ClassTemplate, NewClass};
use crate::error::CatalogServiceError;

// ── ListClasses ──────────────────────────────────────────────────────────────

pub struct ListClassesUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> ListClassesUseCase<R> {
    pub async fn execute(
        &self,
        filter: ClassFilter,
        page: PageRequest,
    ) -> Result<Page<ClassTemplate>, CatalogServiceError> {
        filter.validate()?;
        let page = page.clamped();
        let (classes, total) = self.repo.list(&filter, page).await?;
        Ok(Page::new(classes, total, page))
    }
}

// ── GetClass ─────────────────────────────────────────────────────────────────

pub struct GetClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> GetClassUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<ClassTemplate, CatalogServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogServiceError::ClassNotFound)
    }
}

// ── CreateClass ──────────────────────────────────────────────────────────────

pub struct CreateClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> CreateClassUseCase<R> {
    pub async fn execute(&self, input: NewClass) -> Result<ClassTemplate, CatalogServiceError> {
        let class = self.repo.create(input.normalized()?).await?;
        tracing::info!(class_id = %class.id, weekday = class.weekday, "class template created");
        Ok(class)
    }
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

pub struct UpdateClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> UpdateClassUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        patch: ClassPatch,
    ) -> Result<ClassTemplate, CatalogServiceError> {
        if patch.is_empty() {
            return Err(CatalogServiceError::MissingData);
        }
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogServiceError::ClassNotFound)?;
        let mut next = patch.apply(&current)?;
        next.updated_at = Utc::now();
        if !self.repo.update(&next).await? {
            return Err(CatalogServiceError::ClassNotFound);
        }
        tracing::info!(class_id = %id, "class template updated");
        Ok(next)
    }
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

pub struct DeleteClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> DeleteClassUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CatalogServiceError> {
        if !self.repo.delete(id).await? {
            return Err(CatalogServiceError::ClassNotFound);
        }
        tracing::info!(class_id = %id, "class template deleted");
        Ok(())
    }
}

// ── Statistics ───────────────────────────────────────────────────────────────

pub struct CatalogStatisticsUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> CatalogStatisticsUseCase<R> {
    pub async fn execute(&self) -> Result<CatalogStatistics, CatalogServiceError> {
        let classes = self.repo.all().await?;
        Ok(CatalogStatistics::from_classes(&classes))
    }
}
