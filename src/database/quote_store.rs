use crate::error::app_error::AppError;
use crate::models::quote::{NewQuote, Quote};
use std::sync::Arc;

/// Uniform persistence contract over the two interchangeable engines. The
/// engine is picked once at startup; nothing above this trait ever branches
/// on it.
#[async_trait::async_trait]
pub trait QuoteStore: Send + Sync {
    /// Ensure the `quotes` table exists. Idempotent, run on every start.
    async fn initialize(&self) -> Result<(), AppError>;

    /// Insert one quote and return its assigned id.
    async fn insert(&self, quote: &NewQuote) -> Result<i64, AppError>;

    /// All quotes, newest id first.
    async fn list_all(&self) -> Result<Vec<Quote>, AppError>;

    /// Delete the quote with the given id. Deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

pub type DynQuoteStore = Arc<dyn QuoteStore>;
