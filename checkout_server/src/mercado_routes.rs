//----------------------------------------------   Checkout & webhook  -------------------------------------------------

use actix_web::{web, HttpRequest, HttpResponse};
use checkout_engine::{
    db_types::{ExternalRef, NewPendingOrder, PaymentConfirmation, PaymentStatus, ReconcileOutcome},
    helpers::generate_external_ref,
    traits::OrderStore,
    CheckoutApi,
    ReconciliationApi,
};
use cpg_common::Money;
use log::{error, trace, warn};
use mercado_tools::{
    helpers::{paid_amount, payment_id_from_notification},
    MercadoApi,
    NotificationQuery,
    PreferenceItem,
    WebhookEvent,
};

use crate::{
    data_objects::{CheckoutRequest, CheckoutResponse, JsonResponse},
    errors::ServerError,
    route,
};

route!(create_preference => Post "/create_preference" impl OrderStore);
/// Checkout intake. Validates the submission, opens a payment preference with the gateway, and then stores the
/// pending order under a freshly generated external reference.
///
/// The ordering matters: the gateway call comes first, and a failure there is the shopper's problem (502, try
/// again). Once the preference exists the shopper has a live payment link, so a failure to store the pending order
/// is logged but does not fail the checkout — reconciliation flags the resulting unmatched payment for manual
/// review instead.
pub async fn create_preference<B: OrderStore>(
    body: web::Json<CheckoutRequest>,
    api: web::Data<CheckoutApi<B>>,
    mp: web::Data<MercadoApi>,
) -> Result<HttpResponse, ServerError> {
    trace!("🛒️ Received checkout request");
    let (customer, items) = body.into_inner().try_into_order_parts()?;
    let external_ref = generate_external_ref();
    let preference_items: Vec<PreferenceItem> =
        items.iter().map(|i| PreferenceItem::new(i.producto.as_str(), i.cantidad, i.precio_unitario)).collect();
    let preference = mp.create_checkout_preference(external_ref.as_str(), preference_items).await.map_err(|e| {
        warn!("🛒️ Could not create a payment preference for [{external_ref}]. {e}");
        ServerError::UpstreamError(e.to_string())
    })?;
    let Some(init_point) = preference.payment_url() else {
        warn!("🛒️ The gateway accepted preference {} but returned no payment link.", preference.id);
        return Err(ServerError::UpstreamError("The gateway returned no payment link.".to_string()));
    };
    let response = CheckoutResponse {
        init_point: init_point.to_string(),
        preference_id: preference.id.clone(),
        external_reference: external_ref.to_string(),
    };
    let order = NewPendingOrder::new(external_ref, customer).with_preference_id(preference.id);
    if let Err(e) = api.process_new_checkout(order, items).await {
        error!(
            "🛒️ The pending order for [{}] could not be stored. The payment link is already live, so the checkout \
             continues; an eventual payment will be flagged as unmatched. {e}",
            response.external_reference
        );
    }
    Ok(HttpResponse::Ok().json(response))
}

route!(payment_webhook => Post "/webhook" impl OrderStore);
/// Mercado Pago payment notifications, in both the structured `{type, data.id}` shape and the legacy
/// query-parameter ping.
///
/// Notifications are redelivered until the gateway sees a 2xx, so every recoverable condition here acknowledges
/// with 200: an unactionable payload, a gateway lookup failure (the redelivery becomes the retry), a payment with
/// no reference, and every reconciliation no-op. Only a store fault returns 500 — that is the one case where a
/// redelivery can succeed later and must be provoked.
pub async fn payment_webhook<B: OrderStore>(
    req: HttpRequest,
    body: Option<web::Json<WebhookEvent>>,
    query: web::Query<NotificationQuery>,
    api: web::Data<ReconciliationApi<B>>,
    mp: web::Data<MercadoApi>,
) -> Result<HttpResponse, ServerError> {
    trace!("🔔️ Received payment notification: {}", req.uri());
    let event = body.map(|b| b.into_inner());
    let Some(payment_id) = payment_id_from_notification(event.as_ref(), &query) else {
        warn!("🔔️ Payment notification carried no payment id. Acknowledging and ignoring it.");
        return Ok(HttpResponse::Ok().json(JsonResponse::success("Notification acknowledged.")));
    };
    let payment = match mp.get_payment(&payment_id).await {
        Ok(p) => p,
        Err(e) => {
            warn!("🔔️ Could not fetch payment [{payment_id}] from the gateway. It will redeliver. {e}");
            return Ok(HttpResponse::Ok().json(JsonResponse::failure("Could not fetch the payment record.")));
        },
    };
    let external_ref = match payment.external_reference.as_deref() {
        Some(r) if !r.is_empty() => ExternalRef::from(r),
        _ => {
            warn!("🔔️ Payment [{payment_id}] carries no external reference. Acknowledging and ignoring it.");
            return Ok(HttpResponse::Ok().json(JsonResponse::failure("The payment carries no external reference.")));
        },
    };
    let amount = paid_amount(&payment).unwrap_or_else(|| {
        warn!("🔔️ Payment [{payment_id}] reported no usable amount. Recording zero.");
        Money::default()
    });
    let status = PaymentStatus::from(payment.status.as_str());
    let confirmation = PaymentConfirmation::new(payment_id, external_ref, status, amount);
    let outcome = api.reconcile_payment(confirmation).await?;
    let response = match outcome {
        ReconcileOutcome::Confirmed { order, .. } => JsonResponse::success(format!("Order #{} confirmed.", order.id)),
        ReconcileOutcome::AlreadyProcessed => JsonResponse::success("Order was already confirmed."),
        ReconcileOutcome::NoMatch => JsonResponse::failure("The payment matches no order."),
        ReconcileOutcome::Ignored(status) => JsonResponse::success(format!("Ignoring payment with status {status}.")),
    };
    Ok(HttpResponse::Ok().json(response))
}
