mod checkout;
mod helpers;
mod mocks;
mod webhook;

use actix_web::{test, test::TestRequest, App};

use crate::routes::health;

#[actix_web::test]
async fn the_health_probe_answers() {
    let app = test::init_service(App::new().service(health)).await;
    let req = TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let body = test::read_body(res).await;
    assert_eq!(body, "👍️\n");
}
