//! The receipt mailer.
//!
//! Subscribes to the engine's order-confirmed event and mails the customer a receipt. Delivery is strictly
//! best-effort: a reconciliation must never fail or roll back because a mail could not be sent, so every error in
//! here is logged and swallowed. With SMTP disabled (the default), the receipt is written to the log instead,
//! which is also what you want in development.

use checkout_engine::{
    db_types::{ConfirmedLineItem, ConfirmedOrder},
    events::{EventHandlers, EventHooks},
};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
};
use log::*;

use crate::config::MailerConfig;

pub const MAILER_EVENT_BUFFER_SIZE: usize = 25;

/// Wires the mailer into a fresh set of engine event handlers. The returned handlers still need to be started and
/// their producers handed to the reconciliation API; [`crate::server::run_server`] does both.
pub fn create_mailer_event_handlers(config: MailerConfig) -> EventHandlers {
    let mailer = Mailer::new(config);
    let mut hooks = EventHooks::default();
    hooks.on_order_confirmed(move |ev| {
        let mailer = mailer.clone();
        Box::pin(async move {
            mailer.send_receipt(&ev.order, &ev.items).await;
        })
    });
    EventHandlers::new(MAILER_EVENT_BUFFER_SIZE, hooks)
}

#[derive(Clone)]
pub struct Mailer {
    config: MailerConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Self {
        let transport = if config.enabled {
            match build_transport(&config) {
                Ok(t) => Some(t),
                Err(e) => {
                    error!("📧️ Could not set up the SMTP transport. Receipts will be logged instead. {e}");
                    None
                },
            }
        } else {
            None
        };
        Self { config, transport }
    }

    /// Mails the customer a receipt for a confirmed order. Never fails; problems are logged.
    pub async fn send_receipt(&self, order: &ConfirmedOrder, items: &[ConfirmedLineItem]) {
        let recipient = order.customer.email.as_str();
        if recipient.is_empty() {
            info!("📧️ Order #{} has no customer email address. Skipping the receipt.", order.id);
            return;
        }
        let body = receipt_body(order, items);
        let Some(transport) = &self.transport else {
            info!("📧️ SMTP is disabled. Receipt for order #{} to {recipient}:\n{body}", order.id);
            return;
        };
        let subject = format!("Confirmación de tu compra (pedido #{})", order.id);
        let message = match compose(&self.config.sender, recipient, &subject, body) {
            Ok(m) => m,
            Err(e) => {
                error!("📧️ Could not compose the receipt for order #{}. {e}", order.id);
                return;
            },
        };
        match transport.send(message).await {
            Ok(_) => info!("📧️ Receipt for order #{} sent to {recipient}", order.id),
            Err(e) => error!("📧️ Could not send the receipt for order #{} to {recipient}. {e}", order.id),
        }
    }
}

fn build_transport(config: &MailerConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, lettre::transport::smtp::Error> {
    let mut builder =
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?.port(config.smtp_port);
    if !config.smtp_username.is_empty() {
        builder =
            builder.credentials(Credentials::new(config.smtp_username.clone(), config.smtp_password.reveal().clone()));
    }
    Ok(builder.build())
}

fn compose(sender: &str, recipient: &str, subject: &str, body: String) -> Result<Message, String> {
    let from = sender.parse::<Mailbox>().map_err(|e| format!("The sender address '{sender}' is invalid: {e}"))?;
    let to = recipient.parse::<Mailbox>().map_err(|e| format!("The recipient address '{recipient}' is invalid: {e}"))?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| e.to_string())
}

/// The receipt is plain text, in the storefront's language.
fn receipt_body(order: &ConfirmedOrder, items: &[ConfirmedLineItem]) -> String {
    let mut body = format!(
        "Hola {},\n\n¡Gracias por tu compra! Registramos tu pago y ya estamos preparando el pedido.\n\nPedido #{} \
         ({}):\n",
        order.customer.nombre, order.id, order.external_ref
    );
    for item in items {
        let mut line = format!("  - {} x{}", item.producto, item.cantidad);
        if !item.talle.is_empty() {
            line.push_str(&format!(", talle {}", item.talle));
        }
        if !item.color.is_empty() {
            line.push_str(&format!(", {}", item.color));
        }
        line.push_str(&format!(" — {}\n", item.precio_unitario * item.cantidad));
        body.push_str(&line);
    }
    body.push_str(&format!(
        "\nTotal abonado: {}\n\nTe avisaremos cuando el envío esté en camino.\n",
        order.monto_total
    ));
    body
}
