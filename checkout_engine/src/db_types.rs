//! Data types that are shared between the database layer and the order flow APIs.
use std::fmt::Display;

use chrono::{DateTime, Utc};
use cpg_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

//--------------------------------------     ExternalRef     ---------------------------------------------------------

/// The correlation token linking a checkout to its eventual payment notification. Generated locally at intake time
/// (see [`crate::helpers::generate_external_ref`]), handed to the gateway as an opaque back-reference, and echoed
/// back inside the payment detail record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct ExternalRef(pub String);

impl From<String> for ExternalRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExternalRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for ExternalRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ExternalRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   CustomerDetails   ---------------------------------------------------------

/// Customer and shipping information captured by the storefront checkout form. Every field is an opaque string; the
/// storefront's Spanish field names are kept verbatim all the way down to the column names. Absent form fields are
/// stored as empty strings rather than NULLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub documento: String,
    pub direccion: String,
    pub provincia: String,
    pub ciudad: String,
    pub codigo_postal: String,
    pub celular: String,
    pub tipo_envio: String,
    pub empresa_envio: String,
    pub pais: String,
}

impl CustomerDetails {
    /// "Nombre Apellido", trimmed, for logs and the receipt mail.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }
}

//--------------------------------------    PendingOrder     ---------------------------------------------------------

/// A checkout with an open payment request but no confirmed outcome yet. Destroyed exactly once, by the
/// reconciliation transition, when an approved payment for its reference arrives.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PendingOrder {
    pub id: i64,
    pub external_ref: ExternalRef,
    /// Assigned by the gateway when the preference is created. Can be missing if preference creation partially
    /// failed upstream.
    pub preference_id: Option<String>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   NewPendingOrder   ---------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewPendingOrder {
    pub external_ref: ExternalRef,
    pub preference_id: Option<String>,
    pub customer: CustomerDetails,
    pub created_at: DateTime<Utc>,
}

impl NewPendingOrder {
    pub fn new(external_ref: ExternalRef, customer: CustomerDetails) -> Self {
        Self { external_ref, preference_id: None, customer, created_at: Utc::now() }
    }

    pub fn with_preference_id<S: Into<String>>(mut self, preference_id: S) -> Self {
        self.preference_id = Some(preference_id.into());
        self
    }
}

//--------------------------------------     Line items      ---------------------------------------------------------

/// A product line as submitted by the storefront cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub producto: String,
    pub precio_unitario: Money,
    pub imagen: String,
    pub cantidad: i64,
    pub talle: String,
    pub color: String,
}

impl NewLineItem {
    pub fn new<S: Into<String>>(producto: S, precio_unitario: Money, cantidad: i64) -> Self {
        Self { producto: producto.into(), precio_unitario, cantidad, ..Default::default() }
    }

    pub fn subtotal(&self) -> Money {
        self.precio_unitario * self.cantidad
    }
}

/// A line item attached to a pending order, keyed by the order's external reference.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PendingLineItem {
    pub id: i64,
    pub external_ref: ExternalRef,
    pub producto: String,
    pub precio_unitario: Money,
    pub imagen: String,
    pub cantidad: i64,
    pub talle: String,
    pub color: String,
}

impl PendingLineItem {
    /// True when `item` is a faithful copy of this line under a confirmed order.
    pub fn is_equivalent(&self, item: &ConfirmedLineItem) -> bool {
        self.producto == item.producto &&
            self.precio_unitario == item.precio_unitario &&
            self.imagen == item.imagen &&
            self.cantidad == item.cantidad &&
            self.talle == item.talle &&
            self.color == item.color
    }
}

/// A line item attached to a confirmed order, keyed by the store-assigned order id rather than the external
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ConfirmedLineItem {
    pub id: i64,
    pub order_id: i64,
    pub producto: String,
    pub precio_unitario: Money,
    pub imagen: String,
    pub cantidad: i64,
    pub talle: String,
    pub color: String,
}

//--------------------------------------   ConfirmedOrder    ---------------------------------------------------------

/// The durable record of a completed sale. Created exactly once per external reference and never updated or deleted
/// by this system. The total and payment status come from the gateway's payment record, never from the pending
/// order.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ConfirmedOrder {
    pub id: i64,
    pub external_ref: ExternalRef,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub monto_total: Money,
    pub estado_pago: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------    PaymentStatus    ---------------------------------------------------------

/// The gateway's payment status vocabulary. Only [`PaymentStatus::Approved`] ever triggers a state transition; the
/// rest are recorded and ignored. Unknown strings are preserved in [`PaymentStatus::Other`] so nothing the gateway
/// says is lost in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Approved,
    Pending,
    InProcess,
    Rejected,
    Cancelled,
    Refunded,
    ChargedBack,
    Other(String),
}

impl PaymentStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentStatus::Approved)
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "approved" => Self::Approved,
            "pending" => Self::Pending,
            "in_process" => Self::InProcess,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "refunded" => Self::Refunded,
            "charged_back" => Self::ChargedBack,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Approved => write!(f, "approved"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::InProcess => write!(f, "in_process"),
            PaymentStatus::Rejected => write!(f, "rejected"),
            PaymentStatus::Cancelled => write!(f, "cancelled"),
            PaymentStatus::Refunded => write!(f, "refunded"),
            PaymentStatus::ChargedBack => write!(f, "charged_back"),
            PaymentStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

//-------------------------------------- PaymentConfirmation ---------------------------------------------------------

/// The trusted facts about a payment, as resolved from the gateway's payment-detail endpoint. Never built from a
/// notification body.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    /// The gateway's payment id, carried along for logging and audit.
    pub payment_id: String,
    pub external_ref: ExternalRef,
    pub status: PaymentStatus,
    pub amount: Money,
}

impl PaymentConfirmation {
    pub fn new<S: Into<String>>(payment_id: S, external_ref: ExternalRef, status: PaymentStatus, amount: Money) -> Self {
        Self { payment_id: payment_id.into(), external_ref, status, amount }
    }
}

//--------------------------------------   ReconcileOutcome  ---------------------------------------------------------

/// Every way a payment notification can land. All variants except a store fault are acknowledged to the gateway with
/// a success response; see the server's webhook handler.
#[derive(Debug, Clone)]
pub enum ReconcileOutcome {
    /// The pending order was promoted. Carries the new confirmed order and its line items.
    Confirmed { order: ConfirmedOrder, items: Vec<ConfirmedLineItem> },
    /// A confirmed order already exists for this reference. Duplicate delivery; nothing to do.
    AlreadyProcessed,
    /// No pending order and no confirmed order carry this reference. Logged for manual review.
    NoMatch,
    /// The payment is not approved; the pending order (if any) was left untouched.
    Ignored(PaymentStatus),
}

impl Display for ReconcileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileOutcome::Confirmed { order, items } => {
                write!(f, "confirmed order #{} with {} line items", order.id, items.len())
            },
            ReconcileOutcome::AlreadyProcessed => write!(f, "already processed"),
            ReconcileOutcome::NoMatch => write!(f, "no matching order"),
            ReconcileOutcome::Ignored(status) => write!(f, "ignored ({status})"),
        }
    }
}
