use actix_web::{
    http::StatusCode,
    web::{self, ServiceConfig},
};
use checkout_engine::{events::EventProducers, ReconciliationApi};
use log::*;
use mercado_tools::{MercadoApi, MercadoConfig};
use serde_json::json;

use super::{helpers::post_json, mocks::MockOrderDb};
use crate::mercado_routes::PaymentWebhookRoute;

fn configure_app(store: MockOrderDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let config = MercadoConfig { api_url: "http://127.0.0.1:1".into(), ..MercadoConfig::default() };
        let mercado_api = MercadoApi::new(config).unwrap();
        cfg.app_data(web::Data::new(ReconciliationApi::new(store, EventProducers::default())))
            .app_data(web::Data::new(mercado_api))
            .service(PaymentWebhookRoute::<MockOrderDb>::new());
    }
}

#[actix_web::test]
async fn notifications_without_a_payment_id_are_acknowledged() {
    // Neither the store nor the gateway client may be touched, so the mock carries no expectations and the gateway
    // URL is dead.
    let (status, body) = post_json("/webhook", json!({}), configure_app(MockOrderDb::new())).await;
    info!("Response body: {body}");
    assert_eq!(status.as_u16(), StatusCode::OK.as_u16());
    assert!(body.contains("Notification acknowledged."), "was: {body}");
}

#[actix_web::test]
async fn merchant_order_notifications_are_acknowledged() {
    let payload = json!({ "type": "merchant_order", "data": { "id": "3345.22" } });
    let (status, body) = post_json("/webhook", payload, configure_app(MockOrderDb::new())).await;
    info!("Response body: {body}");
    assert_eq!(status.as_u16(), StatusCode::OK.as_u16());
    assert!(body.contains("Notification acknowledged."), "was: {body}");
}

#[actix_web::test]
async fn an_unreachable_gateway_is_acked_so_the_notification_gets_redelivered() {
    let payload = json!({ "type": "payment", "data": { "id": "119339843" } });
    let (status, body) = post_json("/webhook", payload, configure_app(MockOrderDb::new())).await;
    info!("Response body: {body}");
    assert_eq!(status.as_u16(), StatusCode::OK.as_u16());
    assert!(body.contains("Could not fetch the payment record."), "was: {body}");
}
