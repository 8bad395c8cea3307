use std::env;

use cpg_common::{helpers::env_flag, Secret};
use log::*;
use mercado_tools::MercadoConfig;

const DEFAULT_CPG_HOST: &str = "127.0.0.1";
const DEFAULT_CPG_PORT: u16 = 8360;
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Gateway credentials and the fixed merchant URLs stamped into every preference.
    pub mercado_config: MercadoConfig,
    /// SMTP settings for the receipt mailer.
    pub mailer_config: MailerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CPG_HOST.to_string(),
            port: DEFAULT_CPG_PORT,
            database_url: String::default(),
            mercado_config: MercadoConfig::default(),
            mailer_config: MailerConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CPG_HOST").ok().unwrap_or_else(|| DEFAULT_CPG_HOST.into());
        let port = env::var("CPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CPG_PORT. {e} Using the default, {DEFAULT_CPG_PORT}, instead."
                    );
                    DEFAULT_CPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CPG_PORT);
        let database_url = env::var("CPG_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ CPG_DATABASE_URL is not set. Please set it to the URL for the orders database.");
            String::default()
        });
        let mercado_config = MercadoConfig::new_from_env_or_default();
        let mailer_config = MailerConfig::from_env_or_default();
        Self { host, port, database_url, mercado_config, mailer_config }
    }
}

//-------------------------------------------------  MailerConfig  -----------------------------------------------------

#[derive(Clone, Debug)]
pub struct MailerConfig {
    /// When false, receipt mails are logged instead of sent.
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Leave empty to skip SMTP authentication.
    pub smtp_username: String,
    pub smtp_password: Secret<String>,
    /// The sender mailbox, in `Name <address>` or plain `address` form.
    pub sender: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_username: String::default(),
            smtp_password: Secret::default(),
            sender: "Tienda <no-reply@localhost>".to_string(),
        }
    }
}

impl MailerConfig {
    pub fn from_env_or_default() -> Self {
        let enabled = env_flag("CPG_SMTP_ENABLED", false);
        if !enabled {
            info!("🪛️ CPG_SMTP_ENABLED is not set. Receipt mails will be logged instead of sent.");
        }
        let smtp_host = env::var("CPG_SMTP_HOST").ok().unwrap_or_else(|| {
            if enabled {
                warn!("🪛️ CPG_SMTP_HOST is not set. Receipt mails will fail until it points at a relay.");
            }
            "localhost".to_string()
        });
        let smtp_port = env::var("CPG_SMTP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    warn!("🪛️ {s} is not a valid port for CPG_SMTP_PORT. {e} Using {DEFAULT_SMTP_PORT} instead.");
                    DEFAULT_SMTP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SMTP_PORT);
        let smtp_username = env::var("CPG_SMTP_USERNAME").ok().unwrap_or_default();
        let smtp_password = Secret::new(env::var("CPG_SMTP_PASSWORD").ok().unwrap_or_default());
        let sender = env::var("CPG_SMTP_SENDER").ok().unwrap_or_else(|| {
            if enabled {
                warn!("🪛️ CPG_SMTP_SENDER is not set. Using a placeholder sender address.");
            }
            "Tienda <no-reply@localhost>".to_string()
        });
        Self { enabled, smtp_host, smtp_port, smtp_username, smtp_password, sender }
    }
}
