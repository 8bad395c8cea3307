use checkout_engine::{
    db_types::{
        ConfirmedLineItem,
        ConfirmedOrder,
        ExternalRef,
        NewLineItem,
        NewPendingOrder,
        PaymentConfirmation,
        PendingLineItem,
        PendingOrder,
        ReconcileOutcome,
    },
    traits::{OrderStore, OrderStoreError},
};
use mockall::mock;

mock! {
    pub OrderDb {}
    impl OrderStore for OrderDb {
        fn url(&self) -> &str;
        async fn insert_pending_order(&self, order: NewPendingOrder, items: Vec<NewLineItem>) -> Result<PendingOrder, OrderStoreError>;
        async fn fetch_pending_order(&self, external_ref: &ExternalRef) -> Result<Option<PendingOrder>, OrderStoreError>;
        async fn fetch_pending_line_items(&self, external_ref: &ExternalRef) -> Result<Vec<PendingLineItem>, OrderStoreError>;
        async fn promote_order(&self, confirmation: &PaymentConfirmation) -> Result<ReconcileOutcome, OrderStoreError>;
        async fn fetch_confirmed_order(&self, external_ref: &ExternalRef) -> Result<Option<ConfirmedOrder>, OrderStoreError>;
        async fn fetch_confirmed_line_items(&self, order_id: i64) -> Result<Vec<ConfirmedLineItem>, OrderStoreError>;
        async fn close(&self) -> Result<(), OrderStoreError>;
    }
}
