use uuid::Uuid;

use crate::domain::repository::ClassRepository;
use crate::domain::types::{ClassFilter, ClassTemplate};
use crate::error::CatalogServiceError;

/// Upper bound on ids accepted by one bulk lookup.
pub const MAX_LOOKUP_IDS: usize = 500;

// ── FindClassIds ─────────────────────────────────────────────────────────────

/// Resolve teacher/name filters to template ids, active or not.
pub struct FindClassIdsUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> FindClassIdsUseCase<R> {
    pub async fn execute(
        &self,
        teacher: Option<String>,
        name: Option<String>,
    ) -> Result<Vec<Uuid>, CatalogServiceError> {
        let filter = ClassFilter {
            teacher,
            name,
            weekday: None,
            active: None,
        };
        self.repo.find_ids(&filter).await
    }
}

// ── LookupClasses ────────────────────────────────────────────────────────────

/// Bulk resolve templates. Unknown ids are left out of the result.
pub struct LookupClassesUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> LookupClassesUseCase<R> {
    pub async fn execute(&self, mut ids: Vec<Uuid>) -> Result<Vec<ClassTemplate>, CatalogServiceError> {
        ids.sort_unstable();
        ids.dedup();
        if ids.len() > MAX_LOOKUP_IDS {
            return Err(CatalogServiceError::Validation(format!(
                "at most {MAX_LOOKUP_IDS} ids per lookup"
            )));
        }
        self.repo.find_many(&ids).await
    }
}
