use axum::{
    extract::{Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    accounts::{repo::AccountStore, repo_types::Account},
    auth::jwt::JwtKeys,
    error::ApiError,
    state::AppState,
};

/// Header that carries the account token.
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Decides whether `token` may act on the account stored under `raw_id`.
///
/// Fails closed with [`ApiError::Forbidden`] on a missing or invalid token,
/// an unknown or unparseable id, and a token whose `number` claim differs
/// from the account's number.
pub async fn authorize(
    store: &dyn AccountStore,
    keys: &JwtKeys,
    token: Option<&str>,
    raw_id: &str,
) -> Result<Account, ApiError> {
    let Some(token) = token else {
        warn!(reason = "missing token", "permission denied");
        return Err(ApiError::Forbidden);
    };
    let claims = keys.verify(token).map_err(|e| {
        warn!(reason = "invalid token", error = %e, "permission denied");
        ApiError::Forbidden
    })?;
    let id: i32 = raw_id.parse().map_err(|_| {
        warn!(reason = "bad id", raw_id, "permission denied");
        ApiError::Forbidden
    })?;
    let account = store.get_account_by_id(id).await.map_err(|e| {
        warn!(reason = "account lookup failed", id, error = %e, "permission denied");
        ApiError::Forbidden
    })?;
    if account.number != claims.number {
        warn!(reason = "number mismatch", id, "permission denied");
        return Err(ApiError::Forbidden);
    }
    Ok(account)
}

/// Middleware form of [`authorize`] for routes with an `:id` segment.
pub async fn require_account_owner(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok());
    authorize(state.store.as_ref(), &state.keys, token, &raw_id).await?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{accounts::services::new_account, config::JwtConfig};

    async fn setup() -> (AppState, Account, String) {
        let state = AppState::fake();
        let account = state
            .store
            .create_account(new_account("Ada", "Lovelace", "secret").unwrap())
            .await
            .unwrap();
        let token = state.keys.sign(&account).unwrap();
        (state, account, token)
    }

    #[tokio::test]
    async fn accepts_matching_token() {
        let (state, account, token) = setup().await;
        let got = authorize(state.store.as_ref(), &state.keys, Some(&token), &account.id.to_string())
            .await
            .expect("authorized");
        assert_eq!(got, account);
    }

    #[tokio::test]
    async fn rejects_missing_token() {
        let (state, account, _) = setup().await;
        let err = authorize(state.store.as_ref(), &state.keys, None, &account.id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let (state, account, _) = setup().await;
        let err = authorize(
            state.store.as_ref(),
            &state.keys,
            Some("garbage"),
            &account.id.to_string(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn rejects_token_from_other_secret() {
        let (state, account, _) = setup().await;
        let foreign = JwtKeys::new(&JwtConfig {
            secret: "someone-else".into(),
            issuer: "Admin".into(),
            ttl_minutes: 60,
        })
        .unwrap()
        .sign(&account)
        .unwrap();
        let err = authorize(
            state.store.as_ref(),
            &state.keys,
            Some(&foreign),
            &account.id.to_string(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn rejects_number_mismatch() {
        let (state, account, _) = setup().await;
        let mut other = new_account("Grace", "Hopper", "pw").unwrap();
        other.number = (account.number + 1) % 100_000;
        let other = state.store.create_account(other).await.unwrap();
        let other_token = state.keys.sign(&other).unwrap();

        let err = authorize(
            state.store.as_ref(),
            &state.keys,
            Some(&other_token),
            &account.id.to_string(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn rejects_unknown_or_unparseable_id() {
        let (state, _, token) = setup().await;
        for raw in ["999", "abc"] {
            let err = authorize(state.store.as_ref(), &state.keys, Some(&token), raw)
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Forbidden));
        }
    }
}
