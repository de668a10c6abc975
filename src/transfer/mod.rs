//! Transfer requests are accepted and echoed. No balance is moved.

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::{ApiError, ApiJson},
    routes::method_not_allowed,
    state::AppState,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransferRequest {
    #[serde(rename = "toAccount")]
    pub to_account: i64,
    pub amount: i64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/transfer", post(transfer).fallback(method_not_allowed))
}

#[instrument(skip_all, fields(to_account = payload.to_account, amount = payload.amount))]
pub async fn transfer(
    ApiJson(payload): ApiJson<TransferRequest>,
) -> Result<Json<TransferRequest>, ApiError> {
    info!("transfer received, not applied");
    Ok(Json(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_follow_client_casing() {
        let req: TransferRequest = serde_json::from_str(r#"{"toAccount":3,"amount":250}"#).unwrap();
        assert_eq!(req, TransferRequest { to_account: 3, amount: 250 });
        let back = serde_json::to_value(&req).unwrap();
        assert_eq!(back["toAccount"], 3);
    }
}
