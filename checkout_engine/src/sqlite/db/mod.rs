//! # SQLite database methods
//!
//! This module contains the "low-level" SQLite interactions.
//!
//! Everything here is a plain function taking a `&mut SqliteConnection` rather than a stateful struct. Callers can
//! acquire a connection from a pool, or open a transaction and pass `&mut *tx`, and compose these calls into atomic
//! units as needed. The reconciliation transaction in [`super::SqliteDatabase`] is built exactly that way.
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod confirmed_orders;
pub mod pending_orders;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
