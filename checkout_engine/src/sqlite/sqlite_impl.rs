//! `SqliteDatabase` is the concrete order store shipped with the engine.
//!
//! Unsurprisingly, it keeps order state in SQLite. SQLite gives us real multi-statement transactions, which is what
//! makes the reconciliation transition exactly-once for the store: the pending-order delete, the confirmed-order
//! insert and the line-item copies all commit together or not at all.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

use super::db::{confirmed_orders, new_pool, pending_orders};
use crate::{
    db_types::{
        ConfirmedLineItem,
        ConfirmedOrder,
        ExternalRef,
        NewLineItem,
        NewPendingOrder,
        PaymentConfirmation,
        PendingLineItem,
        PendingOrder,
        ReconcileOutcome,
    },
    traits::{OrderStore, OrderStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, OrderStoreError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database file when it does not exist yet, so a fresh deployment can start against an empty data
    /// directory.
    pub async fn ensure_database_exists(url: &str) -> Result<(), OrderStoreError> {
        if !Sqlite::database_exists(url).await? {
            Sqlite::create_database(url).await?;
            info!("🗃️ Created sqlite database {url}");
        }
        Ok(())
    }

    /// Brings the schema up to date. Run once at startup, after [`Self::ensure_database_exists`].
    pub async fn run_migrations(&self) -> Result<(), OrderStoreError> {
        sqlx::migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| OrderStoreError::DatabaseError(format!("Migration failure: {e}")))?;
        debug!("🗃️ Database migrations complete");
        Ok(())
    }
}

impl OrderStore for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_pending_order(
        &self,
        order: NewPendingOrder,
        items: Vec<NewLineItem>,
    ) -> Result<PendingOrder, OrderStoreError> {
        let mut tx = self.pool.begin().await?;
        let pending = pending_orders::insert_order(&order, &mut tx).await?;
        for item in &items {
            pending_orders::insert_line_item(&pending.external_ref, item, &mut tx).await?;
        }
        tx.commit().await?;
        debug!("🗃️ Pending order [{}] saved with {} line items", pending.external_ref, items.len());
        Ok(pending)
    }

    async fn fetch_pending_order(&self, external_ref: &ExternalRef) -> Result<Option<PendingOrder>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        pending_orders::fetch_order(external_ref, &mut conn).await
    }

    async fn fetch_pending_line_items(
        &self,
        external_ref: &ExternalRef,
    ) -> Result<Vec<PendingLineItem>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        pending_orders::fetch_line_items(external_ref, &mut conn).await
    }

    async fn promote_order(&self, confirmation: &PaymentConfirmation) -> Result<ReconcileOutcome, OrderStoreError> {
        let external_ref = &confirmation.external_ref;
        let mut tx = self.pool.begin().await?;
        let Some(pending) = pending_orders::take_order(external_ref, &mut tx).await? else {
            let processed = confirmed_orders::exists(external_ref, &mut tx).await?;
            tx.commit().await?;
            return Ok(if processed { ReconcileOutcome::AlreadyProcessed } else { ReconcileOutcome::NoMatch });
        };
        let pending_items = pending_orders::take_line_items(external_ref, &mut tx).await?;
        let order =
            confirmed_orders::insert_from_pending(&pending, confirmation.amount, &confirmation.status, &mut tx).await?;
        let mut items = Vec::with_capacity(pending_items.len());
        for item in &pending_items {
            let copied = confirmed_orders::insert_line_item(order.id, item, &mut tx).await?;
            items.push(copied);
        }
        tx.commit().await?;
        debug!(
            "🗃️ Pending order [{external_ref}] retired; confirmed order #{} holds its {} line items",
            order.id,
            items.len()
        );
        Ok(ReconcileOutcome::Confirmed { order, items })
    }

    async fn fetch_confirmed_order(
        &self,
        external_ref: &ExternalRef,
    ) -> Result<Option<ConfirmedOrder>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        confirmed_orders::fetch_order(external_ref, &mut conn).await
    }

    async fn fetch_confirmed_line_items(&self, order_id: i64) -> Result<Vec<ConfirmedLineItem>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        confirmed_orders::fetch_line_items(order_id, &mut conn).await
    }

    async fn close(&self) -> Result<(), OrderStoreError> {
        self.pool.close().await;
        Ok(())
    }
}
