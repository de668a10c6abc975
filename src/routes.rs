use axum::http::Method;

use crate::error::ApiError;

/// Method fallback for single-path routes.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::BadRequest(format!("Method not allowed: {method}"))
}

/// Method fallback for `/account/:id`, which sits behind the account guard.
pub async fn invalid_method() -> ApiError {
    ApiError::BadRequest("Invalid method".into())
}

/// Parses an `:id` path segment.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {raw}")))
}
