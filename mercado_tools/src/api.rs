use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::MercadoConfig,
    data_objects::{NewPreference, PaymentDetail, PreferenceCreated, PreferenceItem},
    MercadoApiError,
};

// A slow gateway must not stall the checkout or notification paths; abandoning and retrying is always safe.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct MercadoApi {
    config: MercadoConfig,
    client: Arc<Client>,
}

impl MercadoApi {
    pub fn new(config: MercadoConfig) -> Result<Self, MercadoApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.access_token.reveal());
        let mut token = HeaderValue::from_str(&bearer).map_err(|e| MercadoApiError::ClientSetup(e.to_string()))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MercadoApiError::ClientSetup(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &MercadoConfig {
        &self.config
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, MercadoApiError> {
        let url = self.url(path);
        trace!("💳️ Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| MercadoApiError::Unreachable(e.to_string()))?;
        if response.status().is_success() {
            trace!("💳️ REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| MercadoApiError::UnexpectedResponse(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| MercadoApiError::Unreachable(e.to_string()))?;
            Err(MercadoApiError::Rejected { status, body })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    /// Opens a checkout preference: the hosted payment session the shopper gets redirected into. The preference
    /// carries the order's external reference and the merchant's fixed redirect and notification URLs.
    pub async fn create_preference(&self, preference: &NewPreference) -> Result<PreferenceCreated, MercadoApiError> {
        debug!("💳️ Creating payment preference for [{}]", preference.external_reference);
        let created =
            self.rest_query::<PreferenceCreated, _>(Method::POST, "/checkout/preferences", Some(preference)).await?;
        info!("💳️ Preference {} created for [{}]", created.id, preference.external_reference);
        Ok(created)
    }

    /// [`Self::create_preference`] with the body assembled from this client's own configuration.
    pub async fn create_checkout_preference(
        &self,
        external_reference: &str,
        items: Vec<PreferenceItem>,
    ) -> Result<PreferenceCreated, MercadoApiError> {
        let preference = NewPreference::new(external_reference, items, &self.config);
        self.create_preference(&preference).await
    }

    /// Fetches the canonical payment record by id. This call, and never the notification body, is the trusted
    /// source for payment status and amount.
    pub async fn get_payment(&self, payment_id: &str) -> Result<PaymentDetail, MercadoApiError> {
        let path = format!("/v1/payments/{payment_id}");
        debug!("💳️ Fetching payment {payment_id}");
        let payment = self.rest_query::<PaymentDetail, ()>(Method::GET, &path, None).await?;
        info!("💳️ Fetched payment {payment_id}. Status is {}", payment.status);
        Ok(payment)
    }
}
