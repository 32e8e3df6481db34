//! Credentials and the authenticated session.
//!
//! A [`Session`] is created once per client by authenticating
//! [`Credentials`] against the common endpoint. It is read-only afterwards:
//! every object call reuses its database, user id and token.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use odoo_core::Value;
use odoo_wire::{Endpoint, Transport};

use crate::{Error, Result};

/// Connection credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Server base URL (`https://example.odoo.com`)
    pub url: String,
    /// Database name
    pub database: String,
    /// Login of the API user
    pub username: String,
    /// API key or password
    pub token: String,
}

impl Credentials {
    /// Bundle credentials.
    pub fn new(
        url: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Credentials {
            url: url.into(),
            database: database.into(),
            username: username.into(),
            token: token.into(),
        }
    }

    /// The token with every character replaced by `*`.
    pub fn masked_token(&self) -> String {
        "*".repeat(self.token.chars().count())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("token", &self.masked_token())
            .finish()
    }
}

/// An authenticated identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    credentials: Credentials,
    uid: i64,
}

impl Session {
    /// Wrap credentials already bound to a user id.
    pub fn new(credentials: Credentials, uid: i64) -> Self {
        Session { credentials, uid }
    }

    /// Call `authenticate(db, username, token, {})` on the common endpoint.
    ///
    /// The remote side answers with the user id, or `false` when the login
    /// is rejected.
    pub fn authenticate(transport: &dyn Transport, credentials: Credentials) -> Result<Session> {
        let response = transport.call(
            Endpoint::Common,
            "authenticate",
            &[
                Value::from(&credentials.database),
                Value::from(&credentials.username),
                Value::from(&credentials.token),
                Value::Object(IndexMap::new()),
            ],
        )?;

        match response {
            Value::Int(uid) => {
                info!(
                    target: "odoo::session",
                    database = %credentials.database,
                    username = %credentials.username,
                    uid,
                    "Authenticated"
                );
                Ok(Session::new(credentials, uid))
            }
            Value::Bool(false) => Err(Error::AuthenticationFailed {
                username: credentials.username,
                database: credentials.database,
            }),
            other => Err(Error::unexpected("authenticate", "user id", &other)),
        }
    }

    /// Authenticated user id.
    pub fn uid(&self) -> i64 {
        self.uid
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.credentials.database
    }

    /// Credentials the session was opened with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn token(&self) -> &str {
        &self.credentials.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("uid", &self.uid)
            .finish()
    }
}

/// Human-readable session summary with the token masked.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Database: {}", self.credentials.database)?;
        writeln!(f, "URL: {}", self.credentials.url)?;
        writeln!(f, "User: {}", self.credentials.username)?;
        write!(f, "API token: {}", self.credentials.masked_token())
    }
}
