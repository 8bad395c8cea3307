use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use checkout_engine::{events::EventProducers, CheckoutApi, ReconciliationApi, SqliteDatabase};
use log::info;
use mercado_tools::MercadoApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::mailer::create_mailer_event_handlers,
    mercado_routes::{CreatePreferenceRoute, PaymentWebhookRoute},
    routes::health,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    SqliteDatabase::ensure_database_exists(&config.database_url)
        .await
        .map_err(|e| ServerError::StartupError(e.to_string()))?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::StartupError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::StartupError(e.to_string()))?;
    info!("🚀️ Order store ready at {}", config.database_url);
    let handlers = create_mailer_event_handlers(config.mailer_config.clone());
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let mercado_api =
        MercadoApi::new(config.mercado_config).map_err(|e| ServerError::StartupError(e.to_string()))?;
    let srv = HttpServer::new(move || {
        let checkout_api = CheckoutApi::new(db.clone());
        let reconciliation_api = ReconciliationApi::new(db.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("cpg::access_log"))
            // The storefront is served from another origin, so the checkout endpoint must answer preflights
            .wrap(Cors::permissive())
            .app_data(web::Data::new(checkout_api))
            .app_data(web::Data::new(reconciliation_api))
            .app_data(web::Data::new(mercado_api.clone()))
            .service(health)
            .service(CreatePreferenceRoute::<SqliteDatabase>::new())
            .service(PaymentWebhookRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
