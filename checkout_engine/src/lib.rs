//! Checkout Payment Engine
//!
//! The core logic for turning storefront checkouts into durable, confirmed orders. The engine is split into:
//! 1. Storage ([`mod@sqlite`]). A pending order and its line items are written at checkout time, keyed by a locally
//!    generated external reference. When the payment gateway later reports an approved payment carrying that
//!    reference, the pending record is promoted into a confirmed order in a single transaction. You should never need
//!    to touch the database directly; the data types in [`db_types`] and the [`traits::OrderStore`] contract are the
//!    public surface.
//! 2. The order flow APIs ([`CheckoutApi`] and [`ReconciliationApi`]). These wrap any [`traits::OrderStore`] backend
//!    and add logging and event publication. Reconciliation is idempotent: re-delivered gateway notifications find no
//!    pending record and fall through as no-ops.
//!
//! The engine also emits an event when an order is confirmed. Subscribe with [`events::EventHooks`] to trigger side
//! effects (receipt mail, fulfilment pings) without coupling them to the reconciliation transaction.
pub mod db_types;
pub mod events;
pub mod helpers;
mod order_flow;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use order_flow::{CheckoutApi, OrderFlowError, ReconciliationApi};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
