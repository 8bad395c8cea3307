use thiserror::Error;

#[derive(Debug, Error)]
pub enum MercadoApiError {
    /// The access token is unusable as a header value, or the HTTP client could not be built.
    #[error("Could not set up the Mercado Pago client. {0}")]
    ClientSetup(String),
    /// The request never produced a usable response: DNS, connect, TLS, or timeout.
    #[error("The gateway did not answer: {0}")]
    Unreachable(String),
    /// A success status arrived but the body did not decode into the expected shape.
    #[error("The gateway sent a response that could not be decoded. {0}")]
    UnexpectedResponse(String),
    /// The gateway answered with a non-success status.
    #[error("The gateway rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
