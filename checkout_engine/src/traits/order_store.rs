use thiserror::Error;

use crate::db_types::{
    ConfirmedLineItem,
    ConfirmedOrder,
    ExternalRef,
    NewLineItem,
    NewPendingOrder,
    PaymentConfirmation,
    PendingLineItem,
    PendingOrder,
    ReconcileOutcome,
};

#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("An order with reference {0} already exists")]
    DuplicateOrder(ExternalRef),
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        OrderStoreError::DatabaseError(e.to_string())
    }
}

/// The contract a database backend fulfils to hold order state for the payment engine.
///
/// Handlers hold the store behind `actix`'s shared data wrapper and the APIs in [`crate::order_flow`], so the trait
/// does not require `Clone`; concrete backends like [`crate::SqliteDatabase`] implement `Clone` themselves for
/// wiring convenience.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// The URL of the backing database.
    fn url(&self) -> &str;

    /// Stores a pending order and its line items as one atomic unit. Fails with
    /// [`OrderStoreError::DuplicateOrder`] if the external reference is already taken, in which case nothing is
    /// written.
    async fn insert_pending_order(
        &self,
        order: NewPendingOrder,
        items: Vec<NewLineItem>,
    ) -> Result<PendingOrder, OrderStoreError>;

    /// Fetches the pending order carrying the given reference, if any.
    async fn fetch_pending_order(&self, external_ref: &ExternalRef) -> Result<Option<PendingOrder>, OrderStoreError>;

    /// Fetches the line items of a pending order.
    async fn fetch_pending_line_items(
        &self,
        external_ref: &ExternalRef,
    ) -> Result<Vec<PendingLineItem>, OrderStoreError>;

    /// Promotes the pending order matching `confirmation.external_ref` into a confirmed order, in a single
    /// transaction:
    /// * the pending order row is removed with a conditional delete — whoever gets the row back owns the promotion;
    ///   concurrent duplicate deliveries find nothing and fall through,
    /// * the confirmed order is written with the **payment record's** amount and status, the pending order's
    ///   customer fields, and copies of every pending line item,
    /// * the pending line items are removed.
    ///
    /// When no pending order matches, reports [`ReconcileOutcome::AlreadyProcessed`] if a confirmed order already
    /// carries the reference, and [`ReconcileOutcome::NoMatch`] otherwise. This method never returns
    /// [`ReconcileOutcome::Ignored`]; filtering out non-approved payments is the caller's job.
    async fn promote_order(&self, confirmation: &PaymentConfirmation) -> Result<ReconcileOutcome, OrderStoreError>;

    /// Fetches the confirmed order carrying the given reference, if any.
    async fn fetch_confirmed_order(
        &self,
        external_ref: &ExternalRef,
    ) -> Result<Option<ConfirmedOrder>, OrderStoreError>;

    /// Fetches the line items of a confirmed order by its store-assigned id.
    async fn fetch_confirmed_line_items(&self, order_id: i64) -> Result<Vec<ConfirmedLineItem>, OrderStoreError>;

    /// Releases the store's connections. Called once at shutdown.
    async fn close(&self) -> Result<(), OrderStoreError>;
}
