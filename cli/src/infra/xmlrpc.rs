//! Blocking HTTP transport for the XML-RPC control plane.
//!
//! One round-trip per call: encode the `methodCall` document, POST it,
//! decode the `methodResponse`. The transport knows nothing about sessions
//! or capabilities — that is [`crate::infra::webfaction::WebfactionClient`].

use crate::domain::error::ApiError;
use wf_api::{Response, Value, decode_response, encode_call};

/// Where encoded calls get POSTed and decoded. Split from the client so the
/// session and capability logic can be tested against a scripted transport.
pub trait RpcTransport {
    /// POST one call and decode the response document.
    fn call(&self, method: &str, params: &[Value]) -> Result<Response, ApiError>;
}

/// Production transport — blocking HTTPS POST via `ureq`.
pub struct HttpTransport {
    url: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RpcTransport for HttpTransport {
    fn call(&self, method: &str, params: &[Value]) -> Result<Response, ApiError> {
        let body = encode_call(method, params);
        let response = ureq::post(&self.url)
            .set("Content-Type", "text/xml; charset=utf-8")
            .set("User-Agent", concat!("slipway/", env!("CARGO_PKG_VERSION")))
            .send_string(&body)
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => ApiError::Http { status },
                other => ApiError::Transport {
                    detail: other.to_string(),
                },
            })?;
        let text = response.into_string().map_err(|e| ApiError::Transport {
            detail: e.to_string(),
        })?;
        Ok(decode_response(&text)?)
    }
}
