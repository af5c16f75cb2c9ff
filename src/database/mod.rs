pub mod postgres;
pub mod quote_store;
pub mod sqlite;
