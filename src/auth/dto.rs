use serde::{Deserialize, Serialize};

/// Request body for login. Echoed back as the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}
