use axum::http::StatusCode;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn banner() -> &'static str {
    "CoffeeTek POS API is running..."
}
