//! Session information and legacy operation names.

use odoo_core::{Criteria, Value};

use super::{unexpected_output, Client};
use crate::legacy::warn_deprecated;
use crate::{Command, Many2OneMode, Output, Result, Session, Table};

impl Client {
    /// The authenticated session.
    pub fn session(&self) -> &Session {
        self.executor.session()
    }

    /// Server version information (`version` on the common endpoint).
    pub fn server_version(&self) -> Result<Value> {
        match self.executor.execute(Command::ServerVersion)? {
            Output::Value(value) => Ok(value),
            other => Err(unexpected_output("version", "Value", &other)),
        }
    }

    /// Database, URL, user and masked token of the session.
    pub fn session_info(&self) -> String {
        self.session().to_string()
    }

    // =========================================================================
    // Legacy names
    // =========================================================================

    /// Former name of [`Client::dataset`].
    ///
    /// `many2one_ids_only` wins over `separate_many2one`; with both unset the
    /// reference columns are left as received.
    #[deprecated(since = "0.1.0", note = "Use dataset() with a Many2OneMode")]
    #[allow(clippy::too_many_arguments)]
    pub fn get_dataset(
        &self,
        model: &str,
        criteria: Option<Criteria>,
        fields: Option<&[&str]>,
        offset: Option<i64>,
        limit: Option<i64>,
        separate_many2one: bool,
        many2one_ids_only: bool,
    ) -> Result<Table> {
        warn_deprecated("get_dataset");
        let mode = Many2OneMode::from_legacy_flags(separate_many2one, many2one_ids_only);
        self.dataset(model, criteria, fields, offset, limit, mode)
    }

    /// Former name of [`Client::session_info`].
    #[deprecated(since = "0.1.0", note = "Use session_info()")]
    pub fn info(&self) -> String {
        warn_deprecated("info");
        self.session_info()
    }
}
