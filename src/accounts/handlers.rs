use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use tracing::{debug, info, instrument};

use crate::{
    accounts::{
        dto::{CreateAccountRequest, DeletedResponse},
        repo_types::Account,
        services::new_account,
    },
    auth::{guard::require_account_owner, jwt::JwtKeys},
    error::{ApiError, ApiJson},
    routes::{invalid_method, method_not_allowed, parse_id},
    state::AppState,
};

pub fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/account",
            get(list_accounts)
                .post(create_account)
                .fallback(method_not_allowed),
        )
        .route(
            "/account/:id",
            get(get_account)
                .delete(delete_account)
                .fallback(invalid_method)
                .layer(middleware::from_fn_with_state(state, require_account_owner)),
        )
}

#[instrument(skip_all)]
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state.store.get_accounts().await?;
    Ok(Json(accounts))
}

#[instrument(skip_all)]
pub async fn create_account(
    State(state): State<AppState>,
    State(keys): State<JwtKeys>,
    ApiJson(payload): ApiJson<CreateAccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let account = new_account(&payload.first_name, &payload.last_name, &payload.password)?;
    let account = state.store.create_account(account).await?;

    // The token is not part of the response body.
    let token = keys.sign(&account)?;
    debug!(id = account.id, %token, "token issued");

    info!(id = account.id, number = account.number, "account created");
    Ok(Json(account))
}

#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let id = parse_id(&raw_id)?;
    let account = state.store.get_account_by_id(id).await?;
    Ok(Json(account))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    state.store.delete_account(id).await?;
    info!(id, "account deleted");
    Ok(Json(DeletedResponse { deleted: id }))
}
