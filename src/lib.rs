mod auth;
mod config;
mod database;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod service;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use database::quote_store::{DynQuoteStore, QuoteStore};

use crate::db::stage_db;
use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use crate::service::notify::Notifier;
use rocket::{Build, Rocket, catchers, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str, json_format: bool) {
    // RUST_LOG takes precedence for fine-grained per-module control,
    // e.g. RUST_LOG=info,quotedesk::routes=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    if json_format {
        subscriber.json().try_init().ok();
    } else {
        subscriber.try_init().ok();
    }
}

fn build_cors(cors_config: &config::CorsConfig) -> CorsOptions {
    // An empty allow-list opens the API to every origin; the public
    // submission form may be hosted anywhere.
    let origins = cors_config.origin_list();
    let allowed_origins = if origins.is_empty() {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&origins.iter().map(String::as_str).collect::<Vec<_>>())
    };

    CorsOptions {
        allowed_origins,
        allowed_methods: vec![Method::Get, Method::Post, Method::Delete, Method::Options]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: rocket_cors::AllowedHeaders::some(&["Content-Type", "Authorization", "Accept"]),
        ..Default::default()
    }
}

fn mount_app(rocket: Rocket<Build>, config: Config) -> Rocket<Build> {
    let cors = build_cors(&config.cors).to_cors().expect("Failed to create CORS fairing");

    rocket
        .attach(cors)
        .attach(RequestLogger)
        .manage(Notifier::new(&config))
        .manage(config)
        .mount("/", app_routes::root::routes())
        .mount("/", app_routes::health::routes())
        .mount("/api/quotes", app_routes::quote::routes())
        .mount("/api/admin", app_routes::admin::routes())
        .register(
            "/",
            catchers![
                app_routes::error::not_found,
                app_routes::error::unauthorized,
                app_routes::error::unprocessable,
                app_routes::error::internal_error,
            ],
        )
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    init_tracing(&config.logging.level, config.logging.json_format);

    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("address", config.server.address.clone()));

    let rocket = rocket::custom(figment).attach(stage_db(config.database.clone()));
    mount_app(rocket, config)
}

/// Build the application over a pre-connected store, bypassing engine
/// selection. Route tests drive this with an in-memory mock.
pub fn build_rocket_with_store(config: Config, store: DynQuoteStore) -> Rocket<Build> {
    mount_app(rocket::build().manage(store), config)
}
