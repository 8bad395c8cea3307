//! # Storage backend contracts.
//!
//! This module defines the interface a database backend must expose to act as the order store for the checkout
//! payment engine.
//!
//! The store holds exactly two kinds of record per purchase: a *pending* order (checkout accepted, payment request
//! open) and a *confirmed* order (an approved payment arrived and was reconciled). The [`OrderStore`] trait covers
//! the whole lifecycle: writing the pending record at intake, the single-transaction promotion that retires it, and
//! the read paths that the flow APIs and tests rely on.
//!
//! The engine guarantees at most one confirmed order per external reference by construction: the promotion step uses
//! a conditional delete of the pending record as its gate, so only one caller can ever observe it as present.
mod order_store;

pub use order_store::{OrderStore, OrderStoreError};
