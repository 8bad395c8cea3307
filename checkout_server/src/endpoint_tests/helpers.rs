use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test::{self, TestRequest},
    web::ServiceConfig,
    App,
};
use serde_json::Value;

/// Assembles an app from `configure`, posts `payload` as JSON to `path`, and hands back the status and raw body.
pub async fn post_json<F>(path: &str, payload: Value, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure)).await;
    let req = TestRequest::post().uri(path).set_json(payload).to_request();
    let (_req, res) = test::call_service(&app, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
