//! High-level typed wrapper for the Executor.
//!
//! The [`Client`] struct provides a typed Rust API over the
//! [`Executor`] and its [`Command`]/[`Output`] enums.
//!
//! ## Output shape
//!
//! Read operations (`read`, `search_read`, `model_fields`) return a
//! [`ReadOutput`]: a list of records or a [`Table`](crate::Table). The shape
//! is the per-call `output` argument when given, else the client default
//! set through [`ClientOptions::default_output`], which itself defaults to
//! tabular.
//!
//! # Example
//!
//! ```text
//! use odoo_executor::{Client, ClientOptions, OutputMode};
//! use odoo_core::{ComparisonOperator, Criteria};
//!
//! let client = Client::connect(ClientOptions::new().default_output(OutputMode::Dict))?;
//!
//! let orders = client.search_read(
//!     "sale.order",
//!     Some(Criteria::filter("state", ComparisonOperator::Eq, "sale")),
//!     Some(&["name", "amount_total"]),
//!     None,
//!     Some(10),
//!     None,
//! )?;
//! ```

mod data;
mod records;
mod session;

use std::sync::Arc;

use odoo_wire::Transport;

use crate::config::ClientOptions;
#[cfg(feature = "http")]
use crate::config::Config;
use crate::extensions::{ExtensionRegistry, Extensions};
use crate::session::Credentials;
use crate::{Command, Executor, Output, OutputMode, ReadOutput, Result};

/// Typed client for one authenticated session.
///
/// The client is read-only after construction and can be shared between
/// threads; every operation is one blocking round trip.
pub struct Client {
    executor: Executor,
    default_output: OutputMode,
    extensions: Extensions,
}

impl Client {
    /// Connect using credentials from the environment (and `.env`).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use odoo_executor::{Client, ClientOptions};
    ///
    /// // ODOO_API_ALT_DB instead of ODOO_API_DB
    /// let client = Client::connect(ClientOptions::new().database(true))?;
    /// ```
    #[cfg(feature = "http")]
    pub fn connect(options: ClientOptions) -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(&config, options)
    }

    /// Connect using credentials resolved from `config`.
    #[cfg(feature = "http")]
    pub fn from_config(config: &Config, options: ClientOptions) -> Result<Self> {
        let credentials = config.credentials(&options.database)?;
        let transport = match options.timeout {
            Some(timeout) => odoo_wire::HttpTransport::with_timeout(&credentials.url, timeout)?,
            None => odoo_wire::HttpTransport::new(&credentials.url)?,
        };
        Self::with_transport(Arc::new(transport), credentials, options)
    }

    /// Authenticate over an explicit transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        options: ClientOptions,
    ) -> Result<Self> {
        let executor = Executor::connect(transport, credentials)?;
        Ok(Self::from_executor(executor, options.default_output))
    }

    /// Wrap an existing executor.
    pub fn from_executor(executor: Executor, default_output: OutputMode) -> Self {
        Client {
            executor,
            default_output,
            extensions: ExtensionRegistry::with_defaults().attach(),
        }
    }

    /// Replace the attached extensions with those of `registry`.
    pub fn with_extensions(mut self, registry: &ExtensionRegistry) -> Self {
        self.extensions = registry.attach();
        self
    }

    /// Typed handle to an attached extension.
    pub fn extension<T: std::any::Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.extensions.get(name)
    }

    /// The underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Execute a raw command.
    pub fn execute_command(&self, cmd: Command) -> Result<Output> {
        self.executor.execute(cmd)
    }

    /// Client-wide output shape.
    pub fn default_output(&self) -> OutputMode {
        self.default_output
    }

    fn shape(&self, records: Vec<odoo_core::Record>, output: Option<OutputMode>) -> ReadOutput {
        ReadOutput::shape(records, OutputMode::resolve(output, self.default_output))
    }
}

fn field_list(fields: Option<&[&str]>) -> Option<Vec<String>> {
    fields.map(|f| f.iter().map(|s| s.to_string()).collect())
}

fn unexpected_output(operation: &str, expected: &str, output: &Output) -> crate::Error {
    let actual = match output {
        Output::Bool(_) => "Bool",
        Output::Id(_) => "Id",
        Output::Ids(_) => "Ids",
        Output::Count(_) => "Count",
        Output::Records(_) => "Records",
        Output::Value(_) => "Value",
    };
    crate::Error::UnexpectedResponse {
        method: operation.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}
