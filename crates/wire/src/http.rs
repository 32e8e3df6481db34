//! HTTP transport backed by a blocking `reqwest` client.

use std::time::Duration;

use odoo_core::Value;
use tracing::trace;

use crate::codec::{decode_response, encode_call};
use crate::transport::{Endpoint, Transport};
use crate::TransportError;

/// XML-RPC over HTTP(S) against `{base_url}/xmlrpc/2/{common,object}`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with the client's default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::build(base_url.into(), None)
    }

    /// Create a transport whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        Self::build(base_url.into(), Some(timeout))
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpTransport {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Server base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl Transport for HttpTransport {
    fn call(
        &self,
        endpoint: Endpoint,
        method: &str,
        params: &[Value],
    ) -> Result<Value, TransportError> {
        let url = self.url(endpoint);
        trace!(target: "odoo::rpc", %url, method, "POST");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(encode_call(method, params))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        decode_response(&body)
    }
}
