//! # Mercado Pago API client
//!
//! Bindings for the slice of the Mercado Pago API that the checkout gateway uses: opening checkout preferences, and
//! fetching the canonical payment record that an asynchronous notification points at. Notification parsing lives
//! here too ([`helpers::payment_id_from_notification`]), since the accepted shapes are Mercado Pago wire formats.
mod api;
mod config;
mod error;

mod data_objects;
pub mod helpers;

pub use api::MercadoApi;
pub use config::{MercadoConfig, DEFAULT_MP_API_URL};
pub use data_objects::{
    BackUrls,
    EventData,
    NewPreference,
    NotificationQuery,
    PaymentDetail,
    PaymentId,
    PreferenceCreated,
    PreferenceItem,
    WebhookEvent,
};
pub use error::MercadoApiError;
