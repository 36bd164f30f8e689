use std::sync::Arc;

use paperback_catalog::{Book, BookPatch, BookWithCategory, NewBook, UpdateRoute};
use paperback_core::{BookId, DomainError, DomainResult};
use paperback_store::{BookStore, CategoryStore, SaleOutcome, StoreError};

/// Default ranking size for the top-selling listing.
pub const DEFAULT_TOP_SELLING_LIMIT: usize = 5;

pub(crate) fn store_err(err: StoreError) -> DomainError {
    DomainError::internal(err.to_string())
}

/// Book inventory orchestration: creation with category validation,
/// the two-path partial update, the guarded sale, and the read paths.
pub struct InventoryService {
    books: Arc<dyn BookStore>,
    categories: Arc<dyn CategoryStore>,
}

impl InventoryService {
    pub fn new(books: Arc<dyn BookStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self { books, categories }
    }

    /// Create a book. The category reference is resolved first; on
    /// failure nothing is persisted. Validate-before-write is the
    /// load-bearing ordering: no book may ever reference a category
    /// that did not exist at creation time.
    pub async fn create_book(&self, book: NewBook) -> DomainResult<Book> {
        book.validate()?;

        let category = self
            .categories
            .find_by_id(book.category)
            .await
            .map_err(store_err)?
            .ok_or_else(|| DomainError::not_found("Category not found"))?;

        let created = self.books.insert(book).await.map_err(store_err)?;
        tracing::info!(
            book_id = %created.id,
            category = %category.name,
            "book created"
        );
        Ok(created)
    }

    /// Partial update. A present, non-zero `stock` selects the relative
    /// adjustment path and every other patch field is ignored; anything
    /// else (including `stock: 0`) selects the field merge. Returns a
    /// success message, not the entity.
    pub async fn update_book(&self, id: BookId, patch: BookPatch) -> DomainResult<String> {
        let updated = match patch.route() {
            UpdateRoute::AdjustStock(delta) => {
                let updated = self
                    .books
                    .adjust_stock(id, delta)
                    .await
                    .map_err(store_err)?;
                if updated.is_some() {
                    tracing::info!(book_id = %id, delta, "stock adjusted");
                }
                updated
            }
            UpdateRoute::MergeFields => self
                .books
                .merge_fields(id, patch.fields())
                .await
                .map_err(store_err)?,
        };

        match updated {
            Some(_) => Ok("Book updated successfully".to_string()),
            None => Err(DomainError::not_found("Book not found")),
        }
    }

    /// Sell `quantity` units. Error precedence: missing book, inactive
    /// book, empty stock, insufficient stock. The decrement itself is a
    /// single conditional store operation, so a concurrent sale that
    /// slips between the guard read and the commit surfaces as
    /// insufficient stock instead of negative inventory.
    pub async fn sell_book(&self, id: BookId, quantity: i64) -> DomainResult<&'static str> {
        let book = self
            .books
            .find_by_id(id)
            .await
            .map_err(store_err)?
            .ok_or_else(|| DomainError::not_found("Book not found"))?;

        book.check_sale(quantity)?;

        match self
            .books
            .commit_sale(id, quantity)
            .await
            .map_err(store_err)?
        {
            SaleOutcome::Completed(updated) => {
                tracing::info!(
                    book_id = %id,
                    quantity,
                    stock = updated.stock,
                    sold = updated.sold,
                    "sale committed"
                );
                Ok("sold successfully")
            }
            SaleOutcome::InsufficientStock => {
                Err(DomainError::bad_request("Not enough books in stock"))
            }
            SaleOutcome::Missing => Err(DomainError::internal("Failed to update book")),
        }
    }

    /// Active books only; store-native order.
    pub async fn list_books(&self) -> DomainResult<Vec<Book>> {
        self.books.list_active().await.map_err(store_err)
    }

    /// Book joined with its category's name. The join is best effort: a
    /// dangling category reference yields `category_name: None`.
    pub async fn get_book(&self, id: BookId) -> DomainResult<BookWithCategory> {
        let book = self
            .books
            .find_by_id(id)
            .await
            .map_err(store_err)?
            .ok_or_else(|| DomainError::not_found("Book not found"))?;

        let category_name = self
            .categories
            .find_by_id(book.category)
            .await
            .map_err(store_err)?
            .map(|c| c.name);

        Ok(BookWithCategory::project(&book, category_name))
    }

    /// Token-prefix search over title and description, each hit joined
    /// with its category name. Hits whose category no longer resolves
    /// are dropped. Zero results is an error, not an empty success.
    pub async fn search_books(&self, query: &str) -> DomainResult<Vec<BookWithCategory>> {
        let hits = self.books.search(query).await.map_err(store_err)?;

        let mut results = Vec::with_capacity(hits.len());
        for book in hits {
            let Some(category) = self
                .categories
                .find_by_id(book.category)
                .await
                .map_err(store_err)?
            else {
                continue;
            };
            results.push(BookWithCategory::project(&book, Some(category.name)));
        }

        if results.is_empty() {
            return Err(DomainError::not_found(
                "No books found matching with your searching",
            ));
        }
        Ok(results)
    }

    /// Active books ranked by descending `sold`. Ties keep store-native
    /// order and are not deterministic.
    pub async fn top_selling_books(&self, limit: usize) -> DomainResult<Vec<Book>> {
        self.books.top_selling(limit).await.map_err(store_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperback_catalog::NewCategory;
    use paperback_core::CategoryId;
    use paperback_store::{CategoryStore, InMemoryBookStore, InMemoryCategoryStore};

    struct Fixture {
        service: InventoryService,
        categories: Arc<InMemoryCategoryStore>,
        books: Arc<InMemoryBookStore>,
    }

    fn fixture() -> Fixture {
        let books = Arc::new(InMemoryBookStore::new());
        let categories = Arc::new(InMemoryCategoryStore::new());
        let service = InventoryService::new(books.clone(), categories.clone());
        Fixture {
            service,
            categories,
            books,
        }
    }

    async fn seed_category(fx: &Fixture, name: &str) -> CategoryId {
        fx.categories
            .insert(NewCategory {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap()
            .id
    }

    fn new_book(category: CategoryId, title: &str, stock: i64) -> NewBook {
        NewBook {
            title: title.to_string(),
            description: None,
            price: 10.0,
            category,
            is_active: true,
            stock,
        }
    }

    #[tokio::test]
    async fn create_book_resolves_category_first() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;

        let created = fx.service.create_book(new_book(cat, "Dune", 10)).await.unwrap();
        assert_eq!(created.category, cat);
        assert!(created.is_active);
        assert_eq!(created.sold, 0);
    }

    #[tokio::test]
    async fn create_book_with_unknown_category_persists_nothing() {
        let fx = fixture();
        let err = fx
            .service
            .create_book(new_book(CategoryId::new(), "Orphan", 1))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("Category not found"));
        assert!(fx.books.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_book_rejects_invalid_payload() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;

        let mut blank = new_book(cat, "Dune", 0);
        blank.title = "  ".to_string();
        assert!(matches!(
            fx.service.create_book(blank).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        let mut negative = new_book(cat, "Dune", 0);
        negative.price = -1.0;
        assert!(matches!(
            fx.service.create_book(negative).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn update_with_non_zero_stock_increments_relative() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 2)).await.unwrap();

        let patch = BookPatch {
            stock: Some(5),
            title: Some("should be ignored".to_string()),
            ..Default::default()
        };
        let msg = fx.service.update_book(book.id, patch).await.unwrap();
        assert_eq!(msg, "Book updated successfully");

        let after = fx.books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 7, "adjustment is relative, not absolute");
        assert_eq!(after.title, "Dune", "other fields ignored on the stock path");
    }

    #[tokio::test]
    async fn update_with_zero_stock_takes_merge_path() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 7)).await.unwrap();

        let patch = BookPatch {
            stock: Some(0),
            title: Some("X".to_string()),
            ..Default::default()
        };
        fx.service.update_book(book.id, patch).await.unwrap();

        let after = fx.books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(after.title, "X", "merge path applies the title");
        assert_eq!(after.stock, 7, "merge path never writes stock");
    }

    #[tokio::test]
    async fn update_merge_replaces_only_given_fields() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx
            .service
            .create_book(NewBook {
                description: Some("original".to_string()),
                ..new_book(cat, "Dune", 1)
            })
            .await
            .unwrap();

        let patch = BookPatch {
            price: Some(20.0),
            is_active: Some(false),
            ..Default::default()
        };
        fx.service.update_book(book.id, patch).await.unwrap();

        let after = fx.books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(after.price, 20.0);
        assert!(!after.is_active);
        assert_eq!(after.title, "Dune");
        assert_eq!(after.description.as_deref(), Some("original"));
    }

    #[tokio::test]
    async fn update_of_unknown_book_is_not_found() {
        let fx = fixture();
        let err = fx
            .service
            .update_book(BookId::new(), BookPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("Book not found"));

        let err = fx
            .service
            .update_book(
                BookId::new(),
                BookPatch {
                    stock: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("Book not found"));
    }

    #[tokio::test]
    async fn sell_decrements_stock_and_increments_sold() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 10)).await.unwrap();

        let msg = fx.service.sell_book(book.id, 3).await.unwrap();
        assert_eq!(msg, "sold successfully");

        let after = fx.books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 7);
        assert_eq!(after.sold, 3);
    }

    #[tokio::test]
    async fn oversell_fails_and_leaves_counters_unchanged() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 10)).await.unwrap();

        fx.service.sell_book(book.id, 3).await.unwrap();
        let err = fx.service.sell_book(book.id, 8).await.unwrap_err();
        assert_eq!(err, DomainError::bad_request("Not enough books in stock"));

        let after = fx.books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 7);
        assert_eq!(after.sold, 3);
    }

    #[tokio::test]
    async fn selling_inactive_book_always_fails() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx
            .service
            .create_book(NewBook {
                is_active: false,
                ..new_book(cat, "Dune", 100)
            })
            .await
            .unwrap();

        let err = fx.service.sell_book(book.id, 1).await.unwrap_err();
        assert_eq!(err, DomainError::bad_request("Book is not active"));
    }

    #[tokio::test]
    async fn selling_from_empty_stock_reports_out_of_stock() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 0)).await.unwrap();

        let err = fx.service.sell_book(book.id, 1).await.unwrap_err();
        assert_eq!(err, DomainError::bad_request("Book is out of stock"));
    }

    #[tokio::test]
    async fn selling_unknown_book_is_not_found() {
        let fx = fixture();
        let err = fx.service.sell_book(BookId::new(), 1).await.unwrap_err();
        assert_eq!(err, DomainError::not_found("Book not found"));
    }

    #[tokio::test]
    async fn non_positive_quantity_is_a_precondition_violation() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 10)).await.unwrap();

        for quantity in [0, -2] {
            let err = fx.service.sell_book(book.id, quantity).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn listing_never_contains_inactive_books() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        fx.service.create_book(new_book(cat, "Active", 1)).await.unwrap();
        fx.service
            .create_book(NewBook {
                is_active: false,
                ..new_book(cat, "Hidden", 1)
            })
            .await
            .unwrap();

        let listed = fx.service.list_books().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|b| b.is_active));
    }

    #[tokio::test]
    async fn inactive_book_remains_retrievable_by_direct_lookup() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx
            .service
            .create_book(NewBook {
                is_active: false,
                ..new_book(cat, "Hidden", 1)
            })
            .await
            .unwrap();

        let found = fx.service.get_book(book.id).await.unwrap();
        assert_eq!(found.title, "Hidden");
        assert_eq!(found.category_name.as_deref(), Some("Fiction"));
    }

    #[tokio::test]
    async fn get_book_joins_category_name_only() {
        let fx = fixture();
        let cat = seed_category(&fx, "Sci-Fi").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 5)).await.unwrap();

        let view = fx.service.get_book(book.id).await.unwrap();
        assert_eq!(view.id, book.id);
        assert_eq!(view.stock, 5);
        assert_eq!(view.category_name.as_deref(), Some("Sci-Fi"));
    }

    #[tokio::test]
    async fn get_unknown_book_is_not_found() {
        let fx = fixture();
        let err = fx.service.get_book(BookId::new()).await.unwrap_err();
        assert_eq!(err, DomainError::not_found("Book not found"));
    }

    #[tokio::test]
    async fn search_joins_category_and_misses_as_not_found() {
        let fx = fixture();
        let cat = seed_category(&fx, "Sci-Fi").await;
        fx.service.create_book(new_book(cat, "Dune Messiah", 1)).await.unwrap();

        let hits = fx.service.search_books("mess").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category_name.as_deref(), Some("Sci-Fi"));

        let err = fx.service.search_books("nothing").await.unwrap_err();
        assert_eq!(
            err,
            DomainError::not_found("No books found matching with your searching")
        );
    }

    #[tokio::test]
    async fn top_selling_returns_at_most_limit_sorted_desc() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        for (title, stock, sales) in [("A", 50, 10), ("B", 50, 30), ("C", 50, 20), ("D", 50, 5)] {
            let book = fx.service.create_book(new_book(cat, title, stock)).await.unwrap();
            fx.service.sell_book(book.id, sales).await.unwrap();
        }

        let top = fx.service.top_selling_books(3).await.unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(
            top.iter().map(|b| b.sold).collect::<Vec<_>>(),
            vec![30, 20, 10]
        );

        // Fewer active books than the limit: return what exists.
        let top = fx.service.top_selling_books(10).await.unwrap();
        assert_eq!(top.len(), 4);
    }

    /// End-to-end scenario from the acceptance notes: Dune in Fiction,
    /// stock 10; sell 3, then fail to sell 8.
    #[tokio::test]
    async fn fiction_dune_sale_scenario() {
        let fx = fixture();
        let cat = seed_category(&fx, "Fiction").await;
        let book = fx.service.create_book(new_book(cat, "Dune", 10)).await.unwrap();

        assert_eq!(fx.service.sell_book(book.id, 3).await.unwrap(), "sold successfully");
        let after = fx.books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!((after.stock, after.sold), (7, 3));

        let err = fx.service.sell_book(book.id, 8).await.unwrap_err();
        assert_eq!(err, DomainError::bad_request("Not enough books in stock"));
        let after = fx.books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!((after.stock, after.sold), (7, 3));
    }
}
