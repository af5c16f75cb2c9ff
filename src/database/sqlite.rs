use crate::config::DatabaseConfig;
use crate::database::quote_store::QuoteStore;
use crate::error::app_error::AppError;
use crate::models::quote::{NewQuote, Quote};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;

/// Embedded file-based engine, the default when no database URL is
/// configured.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::new()
            .filename(&config.sqlite_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl QuoteStore for SqliteStore {
    async fn initialize(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
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
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
        sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::db("Failed to delete quote", e))?;

        Ok(())
    }
}
