use cpg_common::Secret;
use log::*;

pub const DEFAULT_MP_API_URL: &str = "https://api.mercadopago.com";

/// Everything needed to talk to Mercado Pago: credentials, the API host, and the fixed merchant URLs that get
/// stamped into every checkout preference.
#[derive(Debug, Clone, Default)]
pub struct MercadoConfig {
    pub api_url: String,
    pub access_token: Secret<String>,
    /// Where the gateway delivers payment notifications. Must be publicly reachable.
    pub notification_url: String,
    pub success_url: String,
    pub failure_url: String,
    pub pending_url: String,
}

impl MercadoConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("CPG_MP_API_URL").unwrap_or_else(|_| {
            debug!("🪛️ CPG_MP_API_URL not set, using the production Mercado Pago host");
            DEFAULT_MP_API_URL.to_string()
        });
        let access_token = Secret::new(std::env::var("CPG_MP_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("🪛️ CPG_MP_ACCESS_TOKEN not set, using (probably useless) default");
            "TEST-00000000000000".to_string()
        }));
        let notification_url = std::env::var("CPG_MP_NOTIFICATION_URL").unwrap_or_else(|_| {
            warn!("🪛️ CPG_MP_NOTIFICATION_URL not set. The gateway cannot reach a localhost webhook, so payment \
                 notifications will only work once this points at a public URL.");
            "http://localhost:8360/webhook".to_string()
        });
        let success_url = back_url_from_env("CPG_MP_SUCCESS_URL", "https://example.com/success");
        let failure_url = back_url_from_env("CPG_MP_FAILURE_URL", "https://example.com/failure");
        let pending_url = back_url_from_env("CPG_MP_PENDING_URL", "https://example.com/pending");
        Self { api_url, access_token, notification_url, success_url, failure_url, pending_url }
    }
}

fn back_url_from_env(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| {
        warn!("🪛️ {var} not set, using {default}");
        default.to_string()
    })
}
