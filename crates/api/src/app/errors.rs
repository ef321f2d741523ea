use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use coffeetek_infra::CatalogError;

/// User-facing messages, in the language of the POS frontend.
pub mod messages {
    pub const PRODUCT_NOT_FOUND: &str = "Sản phẩm không tồn tại";
    pub const LIST_PRODUCTS_FAILED: &str = "Lỗi server khi lấy danh sách sản phẩm";
    pub const LIST_MODIFIERS_FAILED: &str = "Lỗi server khi lấy modifier";
    pub const LIST_CATEGORIES_FAILED: &str = "Lỗi server khi lấy danh mục";
    pub const LIST_MODIFIER_IDS_FAILED: &str = "Lỗi server khi lấy modifier của sản phẩm";
    pub const UPDATE_STATUS_FAILED: &str = "Lỗi server khi cập nhật trạng thái sản phẩm";
    pub const INVALID_BODY: &str = "Dữ liệu không hợp lệ";
}

/// Map a catalog failure to a response.
///
/// Store failures are logged with full detail; the client only ever sees
/// `failure_message`.
pub fn catalog_error_to_response(
    err: CatalogError,
    failure_message: &'static str,
) -> axum::response::Response {
    match err {
        CatalogError::NotFound(id) => {
            tracing::debug!(product_id = %id, "product not found");
            json_error(StatusCode::NOT_FOUND, messages::PRODUCT_NOT_FOUND)
        }
        CatalogError::StoreFailure(e) => {
            tracing::error!(error = %e, "catalog store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "message": message.into() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffeetek_infra::StoreError;

    #[test]
    fn not_found_maps_to_404() {
        let res = catalog_error_to_response(
            CatalogError::NotFound("9".to_string()),
            messages::LIST_MODIFIERS_FAILED,
        );
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let res = catalog_error_to_response(
            CatalogError::StoreFailure(StoreError::PoolClosed("active_products")),
            messages::LIST_PRODUCTS_FAILED,
        );
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
