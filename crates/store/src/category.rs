use async_trait::async_trait;

use paperback_catalog::{Category, NewCategory};
use paperback_core::CategoryId;

use crate::error::StoreError;

/// Persistence port for category records.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Persist a new category. Fails with `StoreError::DuplicateName`
    /// when a category with the same name already exists; the check and
    /// the insert happen under one guard (case-sensitive exact match).
    async fn insert(&self, category: NewCategory) -> Result<Category, StoreError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError>;

    async fn list(&self) -> Result<Vec<Category>, StoreError>;
}
