//! `paperback-inventory` — orchestration of the inventory and catalog
//! operations.
//!
//! Services are composed explicitly: each receives its store ports at
//! construction and holds no other state. All domain errors are raised
//! here (or below) and propagate unmodified to the HTTP boundary.

pub mod category;
pub mod inventory;

pub use category::CategoryService;
pub use inventory::{DEFAULT_TOP_SELLING_LIMIT, InventoryService};
