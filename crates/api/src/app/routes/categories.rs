use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use paperback_catalog::NewCategory;
use paperback_core::CategoryId;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_category).get(list_categories))
        .route("/:id", get(get_category))
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewCategory>,
) -> axum::response::Response {
    match services.categories.create_category(body).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.categories.list_categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id");
        }
    };

    match services.categories.get_category(id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
