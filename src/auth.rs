use crate::config::AdminConfig;
use crate::error::app_error::AppError;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

/// Claims carried by an admin token. Verification is stateless: there is no
/// server-side session record and no revocation short of expiry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mint an HS256 admin token with the configured lifetime.
pub fn issue_token(config: &AdminConfig) -> Result<String, AppError> {
    if config.token_secret.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let now = Utc::now().timestamp();
    let claims = Claims {
        role: ADMIN_ROLE.to_string(),
        iat: now,
        exp: now + config.token_ttl_hours * 3600,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(config.token_secret.as_bytes()))
        .map_err(|_| AppError::Unauthorized)
}

/// Check signature and expiry against the configured secret.
pub fn verify_token(token: &str, config: &AdminConfig) -> Result<Claims, AppError> {
    if config.token_secret.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(config.token_secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

pub(crate) fn parse_bearer(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Request guard gating the admin list/delete surface. Fails with 401 unless
/// a valid bearer token is presented.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub claims: Claims,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        let config = match req.rocket().state::<crate::config::Config>() {
            Some(config) => config,
            None => return Outcome::Error((Status::InternalServerError, AppError::Unauthorized)),
        };

        let token = req.headers().get_one("Authorization").and_then(parse_bearer);

        match token {
            Some(token) => match verify_token(token, &config.admin) {
                Ok(claims) => Outcome::Success(AdminUser { claims }),
                Err(err) => Outcome::Error((Status::Unauthorized, err)),
            },
            None => Outcome::Error((Status::Unauthorized, AppError::Unauthorized)),
        }
    }
}
