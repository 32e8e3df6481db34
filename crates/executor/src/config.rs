//! Credential configuration.
//!
//! Settings are read from a flat key/value map assembled from an optional
//! dotenv file and the process environment, the environment taking
//! precedence:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `ODOO_API_URL` | Server base URL |
//! | `ODOO_API_USERNAME` | API user login |
//! | `ODOO_API_TOKEN` | API key |
//! | `ODOO_API_DB` | Primary database |
//! | `ODOO_API_ALT_DB` | Alternate database |
//! | `ODOO_API_ALT_DB_<SUFFIX>` | Named alternate databases |
//! | `ODOO_API_ENV_FILE` | Dotenv file to read (default `.env`) |
//!
//! Empty values are treated as unset.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::session::Credentials;
use crate::{Error, OutputMode, Result};

/// Server base URL variable.
pub const URL_VAR: &str = "ODOO_API_URL";
/// API user login variable.
pub const USERNAME_VAR: &str = "ODOO_API_USERNAME";
/// API key variable.
pub const TOKEN_VAR: &str = "ODOO_API_TOKEN";
/// Primary database variable.
pub const DB_VAR: &str = "ODOO_API_DB";
/// Alternate database variable, also the prefix of named alternates.
pub const ALT_DB_VAR: &str = "ODOO_API_ALT_DB";
/// Dotenv file location override.
pub const ENV_FILE_VAR: &str = "ODOO_API_ENV_FILE";

const DEFAULT_ENV_FILE: &str = ".env";

// =============================================================================
// Database selection
// =============================================================================

/// Which database variable the client connects to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseSelector {
    /// `ODOO_API_DB`
    #[default]
    Primary,
    /// `ODOO_API_ALT_DB`
    Alternate,
    /// `ODOO_API_ALT_DB_<suffix>`
    Named(String),
}

impl DatabaseSelector {
    /// Name of the variable holding the database name.
    pub fn variable(&self) -> String {
        match self {
            DatabaseSelector::Primary => DB_VAR.to_string(),
            DatabaseSelector::Alternate => ALT_DB_VAR.to_string(),
            DatabaseSelector::Named(suffix) => format!("{}_{}", ALT_DB_VAR, suffix),
        }
    }
}

impl From<bool> for DatabaseSelector {
    fn from(alternate: bool) -> Self {
        if alternate {
            DatabaseSelector::Alternate
        } else {
            DatabaseSelector::Primary
        }
    }
}

impl From<&str> for DatabaseSelector {
    fn from(suffix: &str) -> Self {
        DatabaseSelector::Named(suffix.to_string())
    }
}

impl From<String> for DatabaseSelector {
    fn from(suffix: String) -> Self {
        DatabaseSelector::Named(suffix)
    }
}

// =============================================================================
// Key/value configuration
// =============================================================================

/// Snapshot of configuration variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    vars: HashMap<String, String>,
}

impl Config {
    /// Load the dotenv file (if any), then overlay the process environment.
    ///
    /// The file is `$ODOO_API_ENV_FILE` when set, else `.env` in the working
    /// directory. A missing default file is not an error; a missing file
    /// named by `ODOO_API_ENV_FILE` is.
    pub fn load() -> Result<Self> {
        let mut merged = HashMap::new();

        match std::env::var(ENV_FILE_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                merged.extend(read_env_file(Path::new(path.trim()))?);
            }
            _ => {
                let default = Path::new(DEFAULT_ENV_FILE);
                if default.is_file() {
                    merged.extend(read_env_file(default)?);
                }
            }
        }

        // Variables that are not valid UTF-8 cannot name or hold a setting.
        merged.extend(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }));

        Ok(Self::from_kv(merged))
    }

    /// Load a dotenv file alone, without the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_kv(read_env_file(path.as_ref())?))
    }

    /// Build from an explicit map.
    pub fn from_kv<K, V, I>(kv: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Config {
            vars: kv.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Value of a variable; empty or whitespace-only values read as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Resolve credentials for the selected database.
    ///
    /// Fails before any network activity when a variable is missing.
    pub fn credentials(&self, database: &DatabaseSelector) -> Result<Credentials> {
        let username = self.require(USERNAME_VAR)?;
        let token = self.require(TOKEN_VAR)?;
        let url = self.require(URL_VAR)?;

        let variable = database.variable();
        let database = self
            .get(&variable)
            .ok_or(Error::DatabaseNotDefined { variable })?;

        Ok(Credentials::new(url, database, username, token))
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingCredential {
            variable: key.to_string(),
        })
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenv::from_path_iter(path).map_err(|e| Error::Config {
        reason: format!("cannot read {}: {}", path.display(), e),
    })?;

    let mut kv = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| Error::Config {
            reason: format!("invalid line in {}: {}", path.display(), e),
        })?;
        kv.insert(key, value);
    }
    Ok(kv)
}

// =============================================================================
// Client options
// =============================================================================

/// Options for connecting a [`Client`](crate::Client).
///
/// ```ignore
/// use odoo_executor::{ClientOptions, OutputMode};
///
/// let opts = ClientOptions::new()
///     .database(true)
///     .default_output(OutputMode::Dict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Database to connect to.
    pub database: DatabaseSelector,
    /// Output shape for read operations when a call does not choose one.
    pub default_output: OutputMode,
    /// HTTP request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    /// Primary database, tabular output, default timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the database (`false`/`true`, a suffix, or a selector).
    pub fn database(mut self, database: impl Into<DatabaseSelector>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the default output shape.
    pub fn default_output(mut self, mode: OutputMode) -> Self {
        self.default_output = mode;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
