//! Error types for client operations.
//!
//! All errors surfaced by the client are represented by the [`Error`] enum.
//! Transport failures are carried unmodified; this layer adds no retry or
//! translation.

use odoo_core::CriteriaError;
use odoo_wire::TransportError;

/// Client errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Configuration | `MissingCredential`, `DatabaseNotDefined`, `Config` | Raised before any network activity |
/// | Session | `AuthenticationFailed` | Login rejected by the server |
/// | Transport | `Transport` | Network, HTTP or remote-side fault |
/// | Capability | `NotSupported` | Wizard-style action requested through `execute` |
/// | Protocol | `UnexpectedResponse` | Response shape does not match the method |
/// | Validation | `InvalidCriteria` | Malformed prefix expression |
/// | Extensions | `UnknownExtension`, `ExtensionTypeMismatch`, `DuplicateExtension` | Registry lookups |
///
/// # Example
///
/// ```ignore
/// use odoo_executor::{Client, Error};
///
/// match client.execute("sale.order", "action_view_invoice", vec![15], None) {
///     Ok(result) => println!("done: {:?}", result),
///     Err(Error::NotSupported { method, .. }) => {
///         println!("'{}' opens a wizard", method);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ==================== Configuration ====================
    /// A required credential variable is unset or empty
    #[error("credential not defined: {variable}")]
    MissingCredential {
        /// Name of the missing variable
        variable: String,
    },

    /// The selected database variable is unset or empty
    #[error("database not defined: {variable}")]
    DatabaseNotDefined {
        /// Name of the missing variable
        variable: String,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },

    // ==================== Session ====================
    /// The remote side rejected the login
    #[error("authentication rejected for '{username}' on database '{database}'")]
    AuthenticationFailed {
        /// Login that was rejected
        username: String,
        /// Database the login was attempted on
        database: String,
    },

    // ==================== Transport ====================
    /// Failure raised by the transport, passed through unmodified
    #[error(transparent)]
    Transport(#[from] TransportError),

    // ==================== Capability ====================
    /// The action answered with a window description instead of a result
    #[error("method '{method}' on '{model}' requires interactive input and is not supported")]
    NotSupported {
        /// Model the method was called on
        model: String,
        /// The action method
        method: String,
    },

    // ==================== Protocol ====================
    /// The response shape does not match the method's contract
    #[error("unexpected response for {method}: expected {expected}, got {actual}")]
    UnexpectedResponse {
        /// Remote method that answered
        method: String,
        /// Shape the method should return
        expected: String,
        /// Type name of what came back
        actual: String,
    },

    // ==================== Validation ====================
    /// Criteria failed prefix-notation validation
    #[error("invalid criteria: {0}")]
    InvalidCriteria(#[from] CriteriaError),

    // ==================== Extensions ====================
    /// No extension registered under this name
    #[error("unknown extension: {name}")]
    UnknownExtension {
        /// Requested extension name
        name: String,
    },

    /// The extension exists but has a different type
    #[error("extension '{name}' has a different type")]
    ExtensionTypeMismatch {
        /// Requested extension name
        name: String,
    },

    /// An extension with this name is already registered
    #[error("extension already registered: {name}")]
    DuplicateExtension {
        /// Name already taken
        name: String,
    },
}

impl Error {
    pub(crate) fn unexpected(
        method: impl Into<String>,
        expected: impl Into<String>,
        actual: &odoo_core::Value,
    ) -> Self {
        Error::UnexpectedResponse {
            method: method.into(),
            expected: expected.into(),
            actual: actual.type_name().to_string(),
        }
    }

    /// True for configuration errors (raised before any network activity).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MissingCredential { .. } | Error::DatabaseNotDefined { .. } | Error::Config { .. }
        )
    }
}
