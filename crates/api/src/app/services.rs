use std::sync::Arc;

use paperback_inventory::{CategoryService, InventoryService};
use paperback_store::{BookStore, CategoryStore, InMemoryBookStore, InMemoryCategoryStore};

/// Composed application services shared across handlers.
///
/// Explicit constructor-based composition: the stores are built once
/// and the services receive them as `Arc<dyn ...>` ports.
pub struct AppServices {
    pub inventory: InventoryService,
    pub categories: CategoryService,
}

pub fn build_services() -> AppServices {
    let books: Arc<dyn BookStore> = Arc::new(InMemoryBookStore::new());
    let categories: Arc<dyn CategoryStore> = Arc::new(InMemoryCategoryStore::new());

    AppServices {
        inventory: InventoryService::new(books.clone(), categories.clone()),
        categories: CategoryService::new(categories, books),
    }
}
