use actix_web::{
    http::StatusCode,
    web::{self, ServiceConfig},
};
use checkout_engine::CheckoutApi;
use log::*;
use mercado_tools::{MercadoApi, MercadoConfig};
use serde_json::json;

use super::{helpers::post_json, mocks::MockOrderDb};
use crate::mercado_routes::CreatePreferenceRoute;

/// None of these tests may reach a real gateway, so the client is pointed at a dead port. Requests that get past
/// validation fail there with a connection error.
fn configure_app(store: MockOrderDb) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let config = MercadoConfig { api_url: "http://127.0.0.1:1".into(), ..MercadoConfig::default() };
        let mercado_api = MercadoApi::new(config).unwrap();
        cfg.app_data(web::Data::new(CheckoutApi::new(store)))
            .app_data(web::Data::new(mercado_api))
            .service(CreatePreferenceRoute::<MockOrderDb>::new());
    }
}

fn valid_payload() -> serde_json::Value {
    json!({
        "title": "Remera negra",
        "quantity": 2,
        "price": 1500,
        "formData": {
            "nombre": "Ana",
            "apellido": "García",
            "email": "ana@example.com",
            "calle": "Av. Siempreviva",
            "numero": "742",
            "provincia": "Buenos Aires",
            "ciudad": "Springfield",
            "codigoPostal": "1407",
            "celular": "+54 11 5555-0000",
            "tipoEnvio": "domicilio",
            "pais": { "label": "Argentina" }
        }
    })
}

#[actix_web::test]
async fn checkout_without_form_data_is_rejected() {
    // The store mock carries no expectations. Any call against it fails the test.
    let payload = json!({ "title": "Remera negra", "quantity": 1, "price": 1500 });
    let (status, body) = post_json("/create_preference", payload, configure_app(MockOrderDb::new())).await;
    info!("Response body: {body}");
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert!(body.contains("The checkout form data is missing."), "was: {body}");
}

#[actix_web::test]
async fn checkout_with_a_garbage_price_is_rejected() {
    let mut payload = valid_payload();
    payload["price"] = json!("mil quinientos");
    let (status, body) = post_json("/create_preference", payload, configure_app(MockOrderDb::new())).await;
    info!("Response body: {body}");
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert!(body.contains("The price must be a number"), "was: {body}");
}

#[actix_web::test]
async fn checkout_with_zero_quantity_is_rejected() {
    let mut payload = valid_payload();
    payload["quantity"] = json!(0);
    let (status, body) = post_json("/create_preference", payload, configure_app(MockOrderDb::new())).await;
    info!("Response body: {body}");
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert!(body.contains("Invalid quantity (0)."), "was: {body}");
}

#[actix_web::test]
async fn an_unreachable_gateway_is_a_bad_gateway_and_nothing_is_stored() {
    let (status, body) = post_json("/create_preference", valid_payload(), configure_app(MockOrderDb::new())).await;
    info!("Response body: {body}");
    assert_eq!(status.as_u16(), StatusCode::BAD_GATEWAY.as_u16());
    assert!(body.contains("The payment gateway could not complete the request."), "was: {body}");
}
