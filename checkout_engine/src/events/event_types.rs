use crate::db_types::{ConfirmedLineItem, ConfirmedOrder};

/// Fired by the reconciliation flow once a pending order has been promoted and the transaction has committed.
/// Carries the full confirmed record so that handlers (receipt mail, mostly) never have to touch the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmedEvent {
    pub order: ConfirmedOrder,
    pub items: Vec<ConfirmedLineItem>,
}

impl OrderConfirmedEvent {
    pub fn new(order: ConfirmedOrder, items: Vec<ConfirmedLineItem>) -> Self {
        Self { order, items }
    }
}
