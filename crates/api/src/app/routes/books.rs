use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use paperback_catalog::{BookPatch, NewBook};
use paperback_core::BookId;
use paperback_inventory::DEFAULT_TOP_SELLING_LIMIT;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_book).get(list_books))
        .route("/search", get(search_books))
        .route("/top-selling", get(top_selling_books))
        .route("/:id", get(get_book).patch(update_book))
        .route("/sell/:id", post(sell_book))
}

fn parse_book_id(raw: &str) -> Result<BookId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid book id"))
}

pub async fn create_book(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewBook>,
) -> axum::response::Response {
    match services.inventory.create_book(body).await {
        Ok(book) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_books(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory.list_books().await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn search_books(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchQuery>,
) -> axum::response::Response {
    let Some(query) = params.q else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "missing query parameter 'q'",
        );
    };

    match services.inventory.search_books(&query).await {
        Ok(hits) => (StatusCode::OK, Json(hits)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn top_selling_books(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::TopSellingQuery>,
) -> axum::response::Response {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_SELLING_LIMIT);

    match services.inventory.top_selling_books(limit).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_book_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.inventory.get_book(id).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(patch): Json<BookPatch>,
) -> axum::response::Response {
    let id = match parse_book_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.inventory.update_book(id, patch).await {
        Ok(message) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": message })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn sell_book(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::SellBookRequest>,
) -> axum::response::Response {
    let id = match parse_book_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.inventory.sell_book(id, body.quantity).await {
        Ok(message) => (StatusCode::OK, message).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
