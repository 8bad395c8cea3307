use checkout_server::{cli::print_help_if_requested, config::ServerConfig, server::run_server};
use dotenvy::dotenv;
use log::info;

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if print_help_if_requested() {
        return;
    }
    let config = ServerConfig::from_env_or_default();
    info!("🚀️ Starting server on {}:{}", config.host, config.port);
    if let Err(e) = run_server(config).await {
        eprintln!("The server shut down with an error. {e}");
    }
}
