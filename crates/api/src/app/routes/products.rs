use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use crate::app::errors::{self, messages};
use crate::app::{dto, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/categories", get(list_categories))
        .route("/:id/modifiers", get(get_product_modifiers))
        .route("/:id/modifier-ids", get(get_product_modifier_ids))
        .route("/:id/status", patch(update_product_status))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog().list_active_products().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, messages::LIST_PRODUCTS_FAILED),
    }
}

pub async fn get_product_modifiers(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.catalog().resolve_modifiers_for_product(&id).await {
        Ok(groups) => (StatusCode::OK, Json(groups)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, messages::LIST_MODIFIERS_FAILED),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog().list_categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, messages::LIST_CATEGORIES_FAILED),
    }
}

pub async fn get_product_modifier_ids(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.catalog().linked_modifier_group_ids(&id).await {
        Ok(ids) => (StatusCode::OK, Json(ids)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, messages::LIST_MODIFIER_IDS_FAILED),
    }
}

pub async fn update_product_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateProductStatusRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            tracing::debug!("rejected status body: {rejection}");
            return errors::json_error(StatusCode::BAD_REQUEST, messages::INVALID_BODY);
        }
    };

    match services.catalog().set_product_active(&id, body.is_active).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => errors::catalog_error_to_response(e, messages::UPDATE_STATUS_FAILED),
    }
}
