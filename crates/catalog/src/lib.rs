//! `paperback-catalog` — pure domain model of the bookstore catalog.
//!
//! Book and category records, their creation/patch payloads, and the
//! deterministic decision helpers (patch routing, sale guards, search
//! matching). No I/O lives here.

pub mod book;
pub mod category;
pub mod search;

pub use book::{Book, BookFields, BookPatch, BookWithCategory, NewBook, UpdateRoute};
pub use category::{Category, CategoryWithBooks, LinkedBook, NewCategory};
