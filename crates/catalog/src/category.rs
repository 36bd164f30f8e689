use serde::{Deserialize, Serialize};

use paperback_core::{CategoryId, DomainError, DomainResult};

/// A named grouping that books reference. The book side owns the
/// relationship; a category's book list is derived by query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating a category. Name uniqueness is enforced by the
/// store at insert time (case-sensitive exact match).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(())
    }
}

/// Minimal projection of a book inside a category detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedBook {
    pub title: String,
    pub price: f64,
}

/// A category joined with its linked books, projected to title+price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithBooks {
    pub id: CategoryId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub books: Vec<LinkedBook>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_rejects_blank_name() {
        let payload = NewCategory {
            name: "  ".to_string(),
            description: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn new_category_accepts_plain_name() {
        let payload = NewCategory {
            name: "Fiction".to_string(),
            description: Some("Novels".to_string()),
        };
        assert!(payload.validate().is_ok());
    }
}
