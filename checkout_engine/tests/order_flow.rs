//! End-to-end tests for the checkout and reconciliation flows against a real SQLite store.
use cpg_common::Money;
use checkout_engine::{
    db_types::{NewPendingOrder, PaymentConfirmation, PaymentStatus, ReconcileOutcome},
    events::EventProducers,
    helpers::generate_external_ref,
    test_utils::{
        approved_payment,
        prepare_test_env,
        random_db_path,
        sample_customer,
        sample_items,
        sample_order,
        tear_down,
    },
    traits::OrderStore,
    CheckoutApi, OrderFlowError, ReconciliationApi, SqliteDatabase,
};
use tokio::runtime::Runtime;

async fn setup() -> (CheckoutApi<SqliteDatabase>, ReconciliationApi<SqliteDatabase>, SqliteDatabase) {
    let url = random_db_path();
    let db = prepare_test_env(&url).await;
    let checkout = CheckoutApi::new(db.clone());
    let reconciliation = ReconciliationApi::new(db.clone(), EventProducers::default());
    (checkout, reconciliation, db)
}

#[test]
fn approved_payment_confirms_the_order() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async move {
        let (checkout, reconciliation, db) = setup().await;
        let items = sample_items();
        let pending = checkout.process_new_checkout(sample_order(), items.clone()).await.unwrap();
        let before = db.fetch_pending_line_items(&pending.external_ref).await.unwrap();
        assert_eq!(before.len(), 2);

        let payment = approved_payment(&pending.external_ref, Money::from_pesos(225));
        let outcome = reconciliation.reconcile_payment(payment).await.unwrap();
        let ReconcileOutcome::Confirmed { order, items: confirmed } = outcome else {
            panic!("Expected a confirmation, got {outcome}");
        };
        assert_eq!(order.external_ref, pending.external_ref);
        assert_eq!(order.customer, sample_customer());
        assert_eq!(order.monto_total, Money::from_pesos(225));
        assert_eq!(order.estado_pago, "approved");
        // every pending line survives, unchanged, under the new parent id
        assert_eq!(confirmed.len(), before.len());
        for (p, c) in before.iter().zip(&confirmed) {
            assert!(p.is_equivalent(c), "line item changed during promotion: {p:?} vs {c:?}");
            assert_eq!(c.order_id, order.id);
        }

        // the pending side is gone
        assert!(db.fetch_pending_order(&pending.external_ref).await.unwrap().is_none());
        assert!(db.fetch_pending_line_items(&pending.external_ref).await.unwrap().is_empty());
        // the confirmed side is queryable
        let stored = db.fetch_confirmed_order(&pending.external_ref).await.unwrap().unwrap();
        assert_eq!(stored, order);
        tear_down(db).await;
    });
}

#[test]
fn duplicate_delivery_is_a_no_op() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async move {
        let (checkout, reconciliation, db) = setup().await;
        let pending = checkout.process_new_checkout(sample_order(), sample_items()).await.unwrap();
        let payment = approved_payment(&pending.external_ref, Money::from_pesos(225));

        let first = reconciliation.reconcile_payment(payment.clone()).await.unwrap();
        assert!(matches!(first, ReconcileOutcome::Confirmed { .. }));
        let second = reconciliation.reconcile_payment(payment).await.unwrap();
        assert!(matches!(second, ReconcileOutcome::AlreadyProcessed));

        // still exactly one confirmed order, with its original line items
        let order = db.fetch_confirmed_order(&pending.external_ref).await.unwrap().unwrap();
        assert_eq!(db.fetch_confirmed_line_items(order.id).await.unwrap().len(), 2);
        tear_down(db).await;
    });
}

#[test]
fn unknown_reference_never_creates_an_order() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async move {
        let (_, reconciliation, db) = setup().await;
        let stray = generate_external_ref();
        let outcome = reconciliation.reconcile_payment(approved_payment(&stray, Money::from_pesos(10))).await.unwrap();
        assert!(matches!(outcome, ReconcileOutcome::NoMatch));
        assert!(db.fetch_confirmed_order(&stray).await.unwrap().is_none());
        tear_down(db).await;
    });
}

#[test]
fn non_approved_payment_leaves_the_pending_order_untouched() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async move {
        let (checkout, reconciliation, db) = setup().await;
        let pending = checkout.process_new_checkout(sample_order(), sample_items()).await.unwrap();
        let rejected = PaymentConfirmation::new(
            "118234765002",
            pending.external_ref.clone(),
            PaymentStatus::Rejected,
            Money::from_pesos(225),
        );

        let outcome = reconciliation.reconcile_payment(rejected).await.unwrap();
        assert!(matches!(outcome, ReconcileOutcome::Ignored(PaymentStatus::Rejected)));
        assert!(db.fetch_pending_order(&pending.external_ref).await.unwrap().is_some());
        assert!(db.fetch_confirmed_order(&pending.external_ref).await.unwrap().is_none());

        // a later approved notification still lands
        let outcome =
            reconciliation.reconcile_payment(approved_payment(&pending.external_ref, Money::from_pesos(225))).await.unwrap();
        assert!(matches!(outcome, ReconcileOutcome::Confirmed { .. }));
        tear_down(db).await;
    });
}

#[test]
fn reused_reference_is_rejected_at_checkout() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async move {
        let (checkout, _, db) = setup().await;
        let external_ref = generate_external_ref();
        let order = NewPendingOrder::new(external_ref.clone(), sample_customer());
        checkout.process_new_checkout(order.clone(), sample_items()).await.unwrap();

        let err = checkout.process_new_checkout(order, sample_items()).await.unwrap_err();
        assert!(matches!(err, OrderFlowError::DuplicateOrder(r) if r == external_ref));
        // the failed insert wrote nothing extra
        assert_eq!(db.fetch_pending_line_items(&external_ref).await.unwrap().len(), 2);
        tear_down(db).await;
    });
}

#[test]
fn concurrent_deliveries_confirm_exactly_once() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async move {
        let (checkout, reconciliation, db) = setup().await;
        let pending = checkout.process_new_checkout(sample_order(), sample_items()).await.unwrap();
        let payment = approved_payment(&pending.external_ref, Money::from_pesos(225));

        let (a, b) = tokio::join!(
            reconciliation.reconcile_payment(payment.clone()),
            reconciliation.reconcile_payment(payment.clone()),
        );
        let outcomes = [a.unwrap(), b.unwrap()];
        let confirmed = outcomes.iter().filter(|o| matches!(o, ReconcileOutcome::Confirmed { .. })).count();
        let deduped = outcomes.iter().filter(|o| matches!(o, ReconcileOutcome::AlreadyProcessed)).count();
        assert_eq!(confirmed, 1, "exactly one delivery may win: {outcomes:?}");
        assert_eq!(deduped, 1);

        let order = db.fetch_confirmed_order(&pending.external_ref).await.unwrap().unwrap();
        assert_eq!(db.fetch_confirmed_line_items(order.id).await.unwrap().len(), 2);
        tear_down(db).await;
    });
}
