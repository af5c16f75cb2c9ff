use crate::config::DatabaseConfig;
use crate::database::postgres::PostgresStore;
use crate::database::quote_store::DynQuoteStore;
use crate::database::sqlite::SqliteStore;
use crate::error::app_error::AppError;
use rocket::fairing::AdHoc;
use std::sync::Arc;

/// Pick the storage engine once, based on whether a remote database URL is
/// configured, and make sure the schema exists.
pub async fn connect_store(config: &DatabaseConfig) -> Result<DynQuoteStore, AppError> {
    let store: DynQuoteStore = if config.url.is_empty() {
        tracing::info!(path = %config.sqlite_path, "using embedded SQLite store");
        Arc::new(SqliteStore::connect(config).await?)
    } else {
        tracing::info!("using remote Postgres store");
        Arc::new(PostgresStore::connect(config).await?)
    };

    store.initialize().await?;
    Ok(store)
}

pub fn stage_db(config: DatabaseConfig) -> AdHoc {
    AdHoc::try_on_ignite("Quote store (sqlx)", |rocket| async move {
        match connect_store(&config).await {
            Ok(store) => {
                tracing::info!("quote store initialized successfully");
                Ok(rocket.manage(store))
            }
            Err(e) => {
                tracing::error!("failed to initialize quote store: {}", e);
                Err(rocket)
            }
        }
    })
}
