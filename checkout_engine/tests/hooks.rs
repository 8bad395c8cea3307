//! Checks that the order-confirmed hook fires once per promotion, with the full confirmed record attached.
use std::{
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicI32, Ordering},
        Arc,
    },
};

use cpg_common::Money;
use checkout_engine::{
    db_types::ReconcileOutcome,
    events::{EventHandlers, EventHooks, OrderConfirmedEvent},
    test_utils::{approved_payment, prepare_test_env, random_db_path, sample_items, sample_order, tear_down},
    CheckoutApi, ReconciliationApi, SqliteDatabase,
};
use log::*;
use tokio::runtime::Runtime;

#[derive(Default, Clone)]
struct HookCalled {
    called: Arc<AtomicI32>,
}

impl HookCalled {
    pub fn called(&self) {
        let _ = self.called.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> i32 {
        self.called.load(Ordering::Relaxed)
    }
}

#[test]
fn on_order_confirmed_fires_once_per_promotion() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let rt = Runtime::new().unwrap();
    let event = HookCalled::default();
    let event_copy = event.clone();
    rt.block_on(async move {
        let url = random_db_path();
        let db = prepare_test_env(&url).await;

        let mut hooks = EventHooks::default();
        hooks.on_order_confirmed(move |ev: OrderConfirmedEvent| {
            let event = event_copy.clone();
            Box::pin(async move {
                info!("🪝️ Order #{} confirmed with {} line item(s)", ev.order.id, ev.items.len());
                assert_eq!(ev.items.len(), 2);
                event.called();
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        });
        let handlers = EventHandlers::new(10, hooks);
        let producers = handlers.producers();
        let channel = handlers.on_order_confirmed.expect("hook was just registered");
        let drain = tokio::spawn(channel.start_handler());

        let checkout = CheckoutApi::new(db.clone());
        let reconciliation = ReconciliationApi::new(db.clone(), producers);

        // two independent checkouts, each confirmed once; the second confirmation is replayed and must not re-fire
        for _ in 0..2 {
            let pending = checkout.process_new_checkout(sample_order(), sample_items()).await.unwrap();
            let payment = approved_payment(&pending.external_ref, Money::from_pesos(225));
            let outcome = reconciliation.reconcile_payment(payment.clone()).await.unwrap();
            assert!(matches!(outcome, ReconcileOutcome::Confirmed { .. }));
            let replay = reconciliation.reconcile_payment(payment).await.unwrap();
            assert!(matches!(replay, ReconcileOutcome::AlreadyProcessed));
        }

        // dropping the producers closes the channel; wait for the handler tasks to drain
        drop(reconciliation);
        drain.await.unwrap();

        tear_down(db).await;
    });
    assert_eq!(event.count(), 2);
    info!("🪝️ test complete");
}
