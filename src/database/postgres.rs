use crate::config::DatabaseConfig;
use crate::database::quote_store::QuoteStore;
use crate::error::app_error::AppError;
use crate::models::quote::{NewQuote, Quote};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::time::Duration;

/// Networked engine, selected when a database URL is configured.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        // require_tls forces TLS without certificate verification, matching
        // managed-Postgres providers that serve self-signed chains.
        let ssl_mode = if config.require_tls { PgSslMode::Require } else { PgSslMode::Disable };
        let options = config.url.parse::<PgConnectOptions>()?.ssl_mode(ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout))
            .idle_timeout(Duration::from_secs(30))
            .max_lifetime(Duration::from_secs(1800))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl QuoteStore for PostgresStore {
    async fn initialize(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotes (
                id BIGSERIAL PRIMARY KEY,
                event_name TEXT NOT NULL,
                event_date TEXT NOT NULL,
                event_place TEXT NOT NULL,
                event_duration TEXT NOT NULL DEFAULT '',
                led_type TEXT NOT NULL DEFAULT '',
                led_size TEXT NOT NULL DEFAULT '',
                led_content TEXT NOT NULL DEFAULT '',
                power TEXT NOT NULL DEFAULT '',
                extra TEXT NOT NULL DEFAULT '',
                contact_name TEXT NOT NULL,
                contact_company TEXT NOT NULL DEFAULT '',
                contact_phone TEXT NOT NULL,
                contact_email TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::db("Failed to initialize quotes table", e))?;

        Ok(())
    }

    async fn insert(&self, quote: &NewQuote) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO quotes (
                event_name, event_date, event_place, event_duration,
                led_type, led_size, led_content, power, extra,
                contact_name, contact_company, contact_phone, contact_email,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&quote.event_name)
        .bind(&quote.event_date)
        .bind(&quote.event_place)
        .bind(&quote.event_duration)
        .bind(&quote.led_type)
        .bind(&quote.led_size)
        .bind(&quote.led_content)
        .bind(&quote.power)
        .bind(&quote.extra)
        .bind(&quote.contact_name)
        .bind(&quote.contact_company)
        .bind(&quote.contact_phone)
        .bind(&quote.contact_email)
        .bind(&quote.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::db("Failed to insert quote", e))?;

        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::db("Failed to list quotes", e))?;

        Ok(quotes)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::db("Failed to delete quote", e))?;

        Ok(())
    }
}
