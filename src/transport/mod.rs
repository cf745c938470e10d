//! Transport seam between the client and the network.
//!
//! The client only ever hands an [`ApiRequest`] to a [`Transport`] and gets a
//! [`RawResponse`] back; it never sees the HTTP library. [`HttpTransport`] is
//! the production implementation.

mod http;

pub use http::HttpTransport;

use crate::protocol::ApiRequest;

/// Status and undecoded body of one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends exactly one request and returns the reply as-is.
///
/// Implementations must not retry and must not interpret the body.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
