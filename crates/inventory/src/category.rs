use std::sync::Arc;

use paperback_catalog::{Category, CategoryWithBooks, LinkedBook, NewCategory};
use paperback_core::{CategoryId, DomainError, DomainResult};
use paperback_store::{BookStore, CategoryStore, StoreError};

use crate::inventory::store_err;

/// Category orchestration: creation with the uniqueness guard, listing,
/// and the detail view with linked books projected to title+price.
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
    books: Arc<dyn BookStore>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>, books: Arc<dyn BookStore>) -> Self {
        Self { categories, books }
    }

    pub async fn create_category(&self, category: NewCategory) -> DomainResult<Category> {
        category.validate()?;

        match self.categories.insert(category).await {
            Ok(created) => {
                tracing::info!(category_id = %created.id, name = %created.name, "category created");
                Ok(created)
            }
            Err(StoreError::DuplicateName(_)) => Err(DomainError::conflict(
                "Category with this name already exists.",
            )),
            Err(err) => Err(store_err(err)),
        }
    }

    pub async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        self.categories.list().await.map_err(store_err)
    }

    /// Category detail with its linked books. The book list is derived
    /// by query (the book side owns the reference) and includes
    /// inactive books, projected to title+price.
    pub async fn get_category(&self, id: CategoryId) -> DomainResult<CategoryWithBooks> {
        let category = self
            .categories
            .find_by_id(id)
            .await
            .map_err(store_err)?
            .ok_or_else(|| DomainError::not_found("Category not found"))?;

        let books = self
            .books
            .find_by_category(id)
            .await
            .map_err(store_err)?
            .into_iter()
            .map(|b| LinkedBook {
                title: b.title,
                price: b.price,
            })
            .collect();

        Ok(CategoryWithBooks {
            id: category.id,
            name: category.name,
            description: category.description,
            books,
        })
    }
}
