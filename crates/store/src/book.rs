use async_trait::async_trait;

use paperback_catalog::{Book, BookFields, NewBook};
use paperback_core::{BookId, CategoryId};

use crate::error::StoreError;

/// Result of an atomic sale commit.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleOutcome {
    /// The guarded decrement applied; carries the updated record.
    Completed(Book),
    /// The floor guard rejected the decrement (`stock < quantity`).
    InsufficientStock,
    /// The target vanished between the caller's read and the commit.
    Missing,
}

/// Persistence port for book records.
///
/// Mutations that must not interleave (`adjust_stock`, `commit_sale`)
/// are atomic within a single call; the caller never sequences a read
/// and a dependent write across two operations.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a new book. Assigns the id and both timestamps.
    async fn insert(&self, book: NewBook) -> Result<Book, StoreError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Active books only, store-native order.
    async fn list_active(&self) -> Result<Vec<Book>, StoreError>;

    /// All books owned by a category, regardless of active flag.
    async fn find_by_category(&self, category: CategoryId) -> Result<Vec<Book>, StoreError>;

    /// Token-prefix search over title and description. No active
    /// filter: search sees inactive books.
    async fn search(&self, query: &str) -> Result<Vec<Book>, StoreError>;

    /// Active books ranked by descending `sold`, truncated to `limit`.
    /// Ties keep store-native order and are not deterministic.
    async fn top_selling(&self, limit: usize) -> Result<Vec<Book>, StoreError>;

    /// Absolute replace of the provided fields; `stock` and `sold` are
    /// never touched. `None` when the id does not resolve.
    async fn merge_fields(&self, id: BookId, fields: BookFields)
    -> Result<Option<Book>, StoreError>;

    /// Relative stock adjustment (`stock += delta`) applied in one
    /// atomic step. `None` when the id does not resolve.
    async fn adjust_stock(&self, id: BookId, delta: i64) -> Result<Option<Book>, StoreError>;

    /// Atomic conditional sale: when `stock >= quantity`, apply
    /// `sold += quantity; stock -= quantity` in the same step.
    /// `quantity` must already be validated as positive.
    async fn commit_sale(&self, id: BookId, quantity: i64) -> Result<SaleOutcome, StoreError>;
}
