//! # Checkout engine public API
//!
//! The pattern for both APIs is the same: an instance is created by supplying a database backend that implements
//! [`crate::traits::OrderStore`], along with any event producers the flow publishes to.
//!
//! * [`CheckoutApi`] makes a new checkout durable once the gateway has issued a payment preference for it.
//! * [`ReconciliationApi`] turns resolved payment records into confirmed orders, at most once per reference.
mod checkout_api;
mod errors;
mod reconciliation_api;

pub use checkout_api::CheckoutApi;
pub use errors::OrderFlowError;
pub use reconciliation_api::ReconciliationApi;
