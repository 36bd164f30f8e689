use thiserror::Error;

/// Store operation error.
///
/// Infrastructure-side failures only; domain rules live above this
/// layer. The one exception is `DuplicateName`, the store-enforced
/// uniqueness guard on category names.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-name constraint violated on insert.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// Backend failure (poisoned lock, broken connection).
    #[error("store backend error: {0}")]
    Backend(String),
}
