use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paperback_core::{BookId, CategoryId, DomainError, DomainResult};

/// A sellable catalog item.
///
/// `stock` is the remaining sellable quantity, `sold` the cumulative
/// units sold. Timestamps are maintained by the store on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: CategoryId,
    pub is_active: bool,
    pub stock: i64,
    pub sold: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Guard checks for a sale attempt, in the order the error contract
    /// requires: active flag, non-empty stock, then sufficiency.
    pub fn check_sale(&self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be a positive number"));
        }
        if !self.is_active {
            return Err(DomainError::bad_request("Book is not active"));
        }
        if self.stock <= 0 {
            return Err(DomainError::bad_request("Book is out of stock"));
        }
        if self.stock < quantity {
            return Err(DomainError::bad_request("Not enough books in stock"));
        }
        Ok(())
    }
}

/// Payload for creating a book. The category reference must resolve to
/// an existing category before anything is persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: CategoryId,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub stock: i64,
}

fn default_active() -> bool {
    true
}

impl NewBook {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        Ok(())
    }
}

/// Partial update payload for a book.
///
/// A present, non-zero `stock` selects the relative-adjustment path; a
/// `stock` of exactly zero is treated as absent and falls through to
/// the field-merge path. That boundary reproduces the behavior of the
/// system this replaces and is pinned by tests.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<CategoryId>,
    pub is_active: Option<bool>,
    pub stock: Option<i64>,
}

/// Which of the two mutually exclusive update paths a patch selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRoute {
    /// Apply `stock += delta` and ignore every other patch field.
    AdjustStock(i64),
    /// Absolute replace of the provided non-stock fields.
    MergeFields,
}

impl BookPatch {
    pub fn route(&self) -> UpdateRoute {
        match self.stock {
            Some(delta) if delta != 0 => UpdateRoute::AdjustStock(delta),
            _ => UpdateRoute::MergeFields,
        }
    }

    /// The merge-path field set. `stock` is deliberately excluded: the
    /// merge path never writes it.
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
            is_active: self.is_active,
        }
    }
}

/// Absolute field replacements applied by the merge update path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<CategoryId>,
    pub is_active: Option<bool>,
}

/// A book joined with its category's name, as returned by lookup and
/// search. Mirrors the projected shape of the original read path: no
/// `sold`, no `is_active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithCategory {
    pub id: BookId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    /// `None` when the category reference no longer resolves.
    pub category_name: Option<String>,
}

impl BookWithCategory {
    pub fn project(book: &Book, category_name: Option<String>) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            price: book.price,
            stock: book.stock,
            category_name,
        }
    }
}
