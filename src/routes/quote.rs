use crate::database::quote_store::DynQuoteStore;
use crate::error::app_error::AppError;
use crate::models::health::OkResponse;
use crate::models::quote::QuoteRequest;
use crate::service::notify::Notifier;
use rocket::serde::json::Json;
use rocket::{State, routes};

/// Quotes are stamped with the business's local time, human-readable, at
/// insertion.
const BUSINESS_TIMEZONE: chrono_tz::Tz = chrono_tz::Asia::Seoul;

fn local_timestamp() -> String {
    chrono::Utc::now().with_timezone(&BUSINESS_TIMEZONE).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Public submission endpoint: validate, persist, then fan out notifications.
/// Success depends only on persistence; notification failures are logged by
/// the dispatcher and never surface here.
#[rocket::post("/", data = "<payload>")]
pub async fn submit_quote(
    store: &State<DynQuoteStore>,
    notifier: &State<Notifier>,
    payload: Json<QuoteRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let quote = payload.into_inner().into_new_quote(local_timestamp())?;

    let id = store.insert(&quote).await?;
    tracing::info!(id, event = %quote.event_name, "quote stored");

    notifier.dispatch(&quote).await;

    Ok(Json(OkResponse::ok()))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![submit_quote]
}
