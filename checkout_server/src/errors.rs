use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use checkout_engine::OrderFlowError;
use mercado_tools::MercadoApiError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("The server could not start. {0}")]
    StartupError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid checkout request. {0}")]
    ValidationError(String),
    #[error("The payment gateway could not complete the request. {0}")]
    UpstreamError(String),
    #[error("The server hit an I/O fault. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Unclassified server fault. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            Self::StartupError(_) | Self::BackendError(_) | Self::IOError(_) | Self::Unspecified(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = json!({ "error": self.to_string() }).to_string();
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body)
    }
}

impl From<MercadoApiError> for ServerError {
    fn from(e: MercadoApiError) -> Self {
        Self::UpstreamError(e.to_string())
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        Self::BackendError(e.to_string())
    }
}
