//! In-memory document store.
//!
//! Intended for dev/test. Two `RwLock<HashMap>` collections stand in
//! for the document database; every guarded mutation runs under a
//! single write-lock acquisition, which is what makes the sale commit
//! and the unique-name insert atomic.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use paperback_catalog::{Book, BookFields, Category, NewBook, NewCategory, search};
use paperback_core::{BookId, CategoryId};

use crate::book::{BookStore, SaleOutcome};
use crate::category::CategoryStore;
use crate::error::StoreError;

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

/// In-memory book collection.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<HashMap<BookId, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn insert(&self, book: NewBook) -> Result<Book, StoreError> {
        let now = Utc::now();
        let record = Book {
            id: BookId::new(),
            title: book.title,
            description: book.description,
            price: book.price,
            category: book.category,
            is_active: book.is_active,
            stock: book.stock,
            sold: 0,
            created_at: now,
            updated_at: now,
        };

        let mut books = self.books.write().map_err(|_| poisoned())?;
        books.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let books = self.books.read().map_err(|_| poisoned())?;
        Ok(books.get(&id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().map_err(|_| poisoned())?;
        Ok(books.values().filter(|b| b.is_active).cloned().collect())
    }

    async fn find_by_category(&self, category: CategoryId) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().map_err(|_| poisoned())?;
        Ok(books
            .values()
            .filter(|b| b.category == category)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().map_err(|_| poisoned())?;
        Ok(books
            .values()
            .filter(|b| search::matches_query(&b.title, b.description.as_deref(), query))
            .cloned()
            .collect())
    }

    async fn top_selling(&self, limit: usize) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().map_err(|_| poisoned())?;
        let mut ranked: Vec<Book> = books.values().filter(|b| b.is_active).cloned().collect();
        ranked.sort_by(|a, b| b.sold.cmp(&a.sold));
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn merge_fields(
        &self,
        id: BookId,
        fields: BookFields,
    ) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().map_err(|_| poisoned())?;
        let Some(book) = books.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = fields.title {
            book.title = title;
        }
        if let Some(description) = fields.description {
            book.description = Some(description);
        }
        if let Some(price) = fields.price {
            book.price = price;
        }
        if let Some(category) = fields.category {
            book.category = category;
        }
        if let Some(is_active) = fields.is_active {
            book.is_active = is_active;
        }
        book.updated_at = Utc::now();

        Ok(Some(book.clone()))
    }

    async fn adjust_stock(&self, id: BookId, delta: i64) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().map_err(|_| poisoned())?;
        let Some(book) = books.get_mut(&id) else {
            return Ok(None);
        };

        book.stock += delta;
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn commit_sale(&self, id: BookId, quantity: i64) -> Result<SaleOutcome, StoreError> {
        let mut books = self.books.write().map_err(|_| poisoned())?;
        let Some(book) = books.get_mut(&id) else {
            return Ok(SaleOutcome::Missing);
        };

        // Floor guard and mutation under the same lock: concurrent
        // sales can never drive stock below zero.
        if quantity <= 0 || book.stock < quantity {
            return Ok(SaleOutcome::InsufficientStock);
        }

        book.sold += quantity;
        book.stock -= quantity;
        book.updated_at = Utc::now();
        Ok(SaleOutcome::Completed(book.clone()))
    }
}

/// In-memory category collection.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn insert(&self, category: NewCategory) -> Result<Category, StoreError> {
        let mut categories = self.categories.write().map_err(|_| poisoned())?;

        // Uniqueness check and insert under one lock.
        if categories.values().any(|c| c.name == category.name) {
            return Err(StoreError::DuplicateName(category.name));
        }

        let record = Category {
            id: CategoryId::new(),
            name: category.name,
            description: category.description,
        };
        categories.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        Ok(categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        Ok(categories.values().cloned().collect())
    }
}
