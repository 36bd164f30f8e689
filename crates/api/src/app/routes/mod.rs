use axum::Router;

pub mod books;
pub mod categories;
pub mod system;

/// Router for all catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/book", books::router())
        .nest("/category", categories::router())
}
