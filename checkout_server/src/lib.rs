//! # Checkout payment server
//! This crate hosts the HTTP surface of the checkout payment gateway. It is responsible for:
//! * Accepting checkout submissions from the storefront and opening a Mercado Pago payment preference for them.
//! * Listening for the gateway's asynchronous payment notifications and feeding them to the reconciliation engine.
//! * Sending a receipt mail once an order is confirmed (via the engine's event hooks).
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: liveness probe, returns a 200 OK response.
//! * `/create_preference`: checkout intake; replies with the payment link for the shopper.
//! * `/webhook`: Mercado Pago payment notifications, in both the structured and the legacy query-parameter shape.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod mercado_routes;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
