use std::fmt::Debug;

use log::*;

use super::OrderFlowError;
use crate::{
    db_types::{NewLineItem, NewPendingOrder, PendingOrder},
    traits::OrderStore,
};

/// `CheckoutApi` records checkouts that have an open payment preference with the gateway.
///
/// It is deliberately thin. Preference creation happens upstream (the gateway client lives in its own crate), so by
/// the time this API is called the payment is already in motion and the only job left is making the pending order
/// durable before the gateway's notification arrives.
pub struct CheckoutApi<B> {
    db: B,
}

impl<B> Debug for CheckoutApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutApi")
    }
}

impl<B> CheckoutApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CheckoutApi<B>
where B: OrderStore
{
    /// Persists a brand-new pending order together with its line items as one unit.
    ///
    /// Fails with [`OrderFlowError::DuplicateOrder`] when the external reference is already in use, in which case
    /// nothing is written.
    pub async fn process_new_checkout(
        &self,
        order: NewPendingOrder,
        items: Vec<NewLineItem>,
    ) -> Result<PendingOrder, OrderFlowError> {
        let n_items = items.len();
        let order = self.db.insert_pending_order(order, items).await?;
        debug!("🔄️🛒️ Checkout [{}] saved with {n_items} line item(s). Awaiting payment.", order.external_ref);
        Ok(order)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
