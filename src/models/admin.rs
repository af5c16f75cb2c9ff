use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}
