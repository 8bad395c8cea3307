//! Typed views of the Mercado Pago wire objects this gateway touches. Request bodies serialize exactly what the
//! gateway expects; response types keep only the fields the checkout flow reads and let the rest fall away.
use std::fmt::Display;

use chrono::{DateTime, Utc};
use cpg_common::{Money, ARS_CURRENCY_CODE};
use serde::{Deserialize, Serialize};

use crate::config::MercadoConfig;

//--------------------------------------  Preference request  --------------------------------------------------------

/// One sellable line in a checkout preference. Prices go over the wire in pesos, as floating point, because that is
/// what the gateway speaks.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    pub title: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub currency_id: String,
}

impl PreferenceItem {
    pub fn new<S: Into<String>>(title: S, quantity: i64, unit_price: Money) -> Self {
        Self {
            title: title.into(),
            quantity,
            unit_price: unit_price.to_pesos(),
            currency_id: ARS_CURRENCY_CODE.to_string(),
        }
    }
}

/// Where the gateway sends the shopper after the hosted checkout finishes.
#[derive(Debug, Clone, Serialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// The request body for opening a checkout preference.
#[derive(Debug, Clone, Serialize)]
pub struct NewPreference {
    pub items: Vec<PreferenceItem>,
    /// The order's correlation token. The gateway treats it as opaque and echoes it back in the payment record.
    pub external_reference: String,
    pub auto_return: String,
    pub back_urls: BackUrls,
    pub notification_url: String,
}

impl NewPreference {
    pub fn new<S: Into<String>>(external_reference: S, items: Vec<PreferenceItem>, config: &MercadoConfig) -> Self {
        Self {
            items,
            external_reference: external_reference.into(),
            auto_return: "approved".to_string(),
            back_urls: BackUrls {
                success: config.success_url.clone(),
                failure: config.failure_url.clone(),
                pending: config.pending_url.clone(),
            },
            notification_url: config.notification_url.clone(),
        }
    }
}

//--------------------------------------  Preference response --------------------------------------------------------

/// The slice of the gateway's preference-creation response that the checkout flow uses.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceCreated {
    pub id: String,
    #[serde(default)]
    pub init_point: Option<String>,
    #[serde(default)]
    pub sandbox_init_point: Option<String>,
}

impl PreferenceCreated {
    /// The link the shopper follows to pay. The production link wins; test-mode preferences only carry the sandbox
    /// one.
    pub fn payment_url(&self) -> Option<&str> {
        self.init_point.as_deref().or(self.sandbox_init_point.as_deref())
    }
}

//--------------------------------------    Payment record    --------------------------------------------------------

/// The canonical payment record, fetched from the gateway by id. This, and never the notification that announced
/// it, is the source of truth for status and amount.
///
/// The total appears under a different name depending on payment type and API era, so all three candidates are
/// kept; [`crate::helpers::paid_amount`] picks the first present.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDetail {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub transaction_amount: Option<f64>,
    #[serde(default)]
    pub total_paid_amount: Option<f64>,
    #[serde(default)]
    pub transaction_amounts: Option<Vec<f64>>,
    #[serde(default)]
    pub date_approved: Option<DateTime<Utc>>,
}

//--------------------------------------     Notifications    --------------------------------------------------------

/// The structured notification body the gateway POSTs at the webhook endpoint. Everything in it is untrusted
/// metadata; only the payment id is ever read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub data: Option<EventData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub id: Option<PaymentId>,
}

/// The gateway writes payment ids as JSON numbers in some notification flavours and as strings in others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PaymentId {
    Numeric(i64),
    Text(String),
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentId::Numeric(id) => write!(f, "{id}"),
            PaymentId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// Query parameters carried by the legacy IPN-style ping, where the id arrives outside the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}
