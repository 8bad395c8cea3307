use std::fmt::Debug;

use log::*;

use super::OrderFlowError;
use crate::{
    db_types::{ConfirmedLineItem, ConfirmedOrder, PaymentConfirmation, ReconcileOutcome},
    events::{EventProducers, OrderConfirmedEvent},
    traits::OrderStore,
};

/// `ReconciliationApi` is the heart of the engine. It turns resolved gateway payment records into confirmed orders.
///
/// The transition is idempotent by construction: the precondition for a promotion is that a pending order still
/// exists for the payment's reference, and removing that pending order is part of the same transaction as writing
/// the confirmed one. A duplicate delivery of the same notification therefore finds nothing to promote and falls
/// through as a harmless no-op, whatever the interleaving.
pub struct ReconciliationApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for ReconciliationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi")
    }
}

impl<B> ReconciliationApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> ReconciliationApi<B>
where B: OrderStore
{
    /// Reconciles a resolved payment record against the order store.
    ///
    /// * A payment whose status is anything but approved is reported as [`ReconcileOutcome::Ignored`] without
    ///   touching the store; its pending order, if one exists, stays available for a later approved notification.
    /// * An approved payment promotes the pending order carrying its reference, and the confirmed-order event is
    ///   published to subscribers once the transaction has committed.
    /// * An approved payment matching no pending order is acknowledged as [`ReconcileOutcome::AlreadyProcessed`]
    ///   (its reference names an existing confirmed order) or flagged as [`ReconcileOutcome::NoMatch`].
    pub async fn reconcile_payment(
        &self,
        confirmation: PaymentConfirmation,
    ) -> Result<ReconcileOutcome, OrderFlowError> {
        let payment_id = confirmation.payment_id.as_str();
        let external_ref = &confirmation.external_ref;
        if !confirmation.status.is_approved() {
            info!(
                "🔄️💰️ Payment [{payment_id}] for [{external_ref}] is {}. Leaving orders untouched.",
                confirmation.status
            );
            return Ok(ReconcileOutcome::Ignored(confirmation.status));
        }
        let outcome = self.db.promote_order(&confirmation).await?;
        match &outcome {
            ReconcileOutcome::Confirmed { order, items } => {
                info!(
                    "🔄️💰️ Payment [{payment_id}] confirmed order #{} for {} with {} line item(s)",
                    order.id,
                    order.monto_total,
                    items.len()
                );
                self.call_order_confirmed_hook(order, items).await;
            },
            ReconcileOutcome::AlreadyProcessed => {
                info!(
                    "🔄️💰️ Payment [{payment_id}] for [{external_ref}] was delivered again after confirmation. \
                     Nothing to do."
                );
            },
            ReconcileOutcome::NoMatch => {
                warn!(
                    "🔄️💰️ Payment [{payment_id}] references [{external_ref}], which matches no order. Record the \
                     payment id for manual review."
                );
            },
            // promote_order never reports Ignored; non-approved payments were filtered out above
            ReconcileOutcome::Ignored(_) => {},
        }
        Ok(outcome)
    }

    async fn call_order_confirmed_hook(&self, order: &ConfirmedOrder, items: &[ConfirmedLineItem]) {
        for producer in &self.producers.order_confirmed_producer {
            debug!("🔄️💰️ Notifying order confirmed subscribers");
            let event = OrderConfirmedEvent::new(order.clone(), items.to_vec());
            producer.publish_event(event).await;
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
