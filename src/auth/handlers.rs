use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    accounts::services::verify_password,
    auth::dto::LoginRequest,
    error::{ApiError, ApiJson},
    routes::method_not_allowed,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login).fallback(method_not_allowed))
}

/// Looks the account up by number and echoes the request.
///
/// No token is returned. The stored hash is only checked when
/// `LOGIN_VERIFY_PASSWORD` is enabled.
#[instrument(skip_all, fields(number = payload.number))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginRequest>, ApiError> {
    let account = state.store.get_account_by_number(payload.number).await?;

    if state.config.login.verify_password
        && !verify_password(&payload.password, &account.encrypted_password)?
    {
        warn!(id = account.id, "login invalid password");
        return Err(ApiError::BadRequest("invalid credentials".into()));
    }

    info!(id = account.id, "login account found");
    Ok(Json(payload))
}
