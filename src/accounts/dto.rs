use serde::{Deserialize, Serialize};

/// Request body for `POST /account`.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub password: String,
}

/// Response body for `DELETE /account/{id}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedResponse {
    #[serde(rename = "Deleted")]
    pub deleted: i32,
}
