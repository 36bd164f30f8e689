//! `paperback-store` — persistence ports and the in-memory document store.
//!
//! The service layer talks to two capabilities, `BookStore` and
//! `CategoryStore`. Every multi-step mutation the domain needs (guarded
//! sale commit, unique-name insert, relative stock adjustment) is a
//! single atomic store operation, so callers never hold intermediate
//! state across a write.

pub mod book;
pub mod category;
pub mod error;
pub mod memory;

pub use book::{BookStore, SaleOutcome};
pub use category::CategoryStore;
pub use error::StoreError;
pub use memory::{InMemoryBookStore, InMemoryCategoryStore};
