//! The transport seam between the executor and the network.

use std::sync::Arc;

use odoo_core::Value;

use crate::TransportError;

/// Remote service addressed by a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Session services: `version`, `authenticate`
    Common,
    /// Model services: `execute_kw`
    Object,
}

impl Endpoint {
    /// URL path of the endpoint, relative to the server base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Common => "/xmlrpc/2/common",
            Endpoint::Object => "/xmlrpc/2/object",
        }
    }
}

/// A blocking remote-procedure channel.
///
/// Implementations perform exactly one round trip per call and report any
/// failure as a [`TransportError`]. They must be safe to share between
/// threads; the client only ever reads from them.
pub trait Transport: Send + Sync {
    /// Invoke `method` on `endpoint` with positional `params`.
    fn call(
        &self,
        endpoint: Endpoint,
        method: &str,
        params: &[Value],
    ) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn call(
        &self,
        endpoint: Endpoint,
        method: &str,
        params: &[Value],
    ) -> Result<Value, TransportError> {
        (**self).call(endpoint, method, params)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(
        &self,
        endpoint: Endpoint,
        method: &str,
        params: &[Value],
    ) -> Result<Value, TransportError> {
        (**self).call(endpoint, method, params)
    }
}
