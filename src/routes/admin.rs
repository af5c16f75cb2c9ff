use crate::auth::{AdminUser, issue_token};
use crate::config::Config;
use crate::database::quote_store::DynQuoteStore;
use crate::error::app_error::AppError;
use crate::models::admin::{LoginRequest, TokenResponse};
use crate::models::health::OkResponse;
use crate::models::quote::Quote;
use rocket::serde::json::Json;
use rocket::{State, routes};

/// Exchange the static admin password for a short-lived bearer token.
#[rocket::post("/login", data = "<payload>")]
pub async fn login(config: &State<Config>, payload: Json<LoginRequest>) -> Result<Json<TokenResponse>, AppError> {
    let admin = &config.admin;
    if admin.password.is_empty() || payload.password != admin.password {
        return Err(AppError::InvalidPassword);
    }

    let token = issue_token(admin)?;
    Ok(Json(TokenResponse { token }))
}

#[rocket::get("/quotes")]
pub async fn list_quotes(store: &State<DynQuoteStore>, _admin: AdminUser) -> Result<Json<Vec<Quote>>, AppError> {
    let quotes = store.list_all().await?;
    Ok(Json(quotes))
}

#[rocket::delete("/quotes/<id>")]
pub async fn delete_quote(store: &State<DynQuoteStore>, _admin: AdminUser, id: i64) -> Result<Json<OkResponse>, AppError> {
    store.delete_by_id(id).await?;
    tracing::info!(id, "quote deleted");
    Ok(Json(OkResponse::ok()))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![login, list_quotes, delete_quote]
}
