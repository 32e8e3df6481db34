//! The Executor - single chokepoint for remote calls.
//!
//! The Executor turns a [`Command`] into [`Params`], sends exactly one
//! `execute_kw` call and checks that the response has the shape the method
//! promises. It holds the transport and the authenticated session and has
//! no other state.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use odoo_core::{Record, Value};
use odoo_wire::{Endpoint, Transport};

use crate::command::ListOrItem;
use crate::params::Params;
use crate::session::{Credentials, Session};
use crate::types::Method;
use crate::{Command, Error, Output, Result};

/// Remote method on the object endpoint that carries every model call.
pub const EXECUTE_KW: &str = "execute_kw";

/// The command executor.
///
/// Each call is a single blocking round trip with no retry; transport
/// failures are returned unmodified.
///
/// # Thread Safety
///
/// Executor is `Send + Sync`; the session is read-only after construction.
///
/// # Example
///
/// ```ignore
/// use odoo_executor::{Command, Executor, Output};
/// use odoo_core::Criteria;
///
/// let executor = Executor::connect(transport, credentials)?;
///
/// let output = executor.execute(Command::SearchCount {
///     model: "res.partner".into(),
///     criteria: Criteria::new(),
/// })?;
/// assert!(matches!(output, Output::Count(_)));
/// ```
pub struct Executor {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl Executor {
    /// Create an executor over an established session.
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self { transport, session }
    }

    /// Authenticate `credentials`, then create an executor.
    pub fn connect(transport: Arc<dyn Transport>, credentials: Credentials) -> Result<Self> {
        let session = Session::authenticate(transport.as_ref(), credentials)?;
        Ok(Self::new(transport, session))
    }

    /// The authenticated session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        if let Some(criteria) = cmd.criteria() {
            criteria.validate()?;
        }

        match cmd {
            Command::ServerVersion => {
                debug!(target: "odoo::rpc", "version");
                let response = self.transport.call(Endpoint::Common, "version", &[])?;
                Ok(Output::Value(response))
            }

            Command::CheckAccessRights {
                model,
                right,
                raise_exception,
            } => {
                let params = Params::new()
                    .right_type(right)
                    .raise_exception(raise_exception);
                let response = self.request(&model, &Method::CheckAccessRights, &params)?;
                expect_bool("check_access_rights", response).map(Output::Bool)
            }

            Command::Create { model, records } => match records {
                ListOrItem::Item(record) => {
                    let params = Params::new().records_data(record);
                    let response = self.request(&model, &Method::Create, &params)?;
                    match response {
                        Value::Array(items) if items.len() == 1 => {
                            expect_id("create", items[0].clone()).map(Output::Id)
                        }
                        other => expect_id("create", other).map(Output::Id),
                    }
                }
                ListOrItem::List(records) => {
                    let data: Vec<Value> = records.into_iter().map(Value::Object).collect();
                    let params = Params::new().records_data(data);
                    let response = self.request(&model, &Method::Create, &params)?;
                    match response {
                        Value::Int(id) => Ok(Output::Ids(vec![id])),
                        other => expect_ids("create", other).map(Output::Ids),
                    }
                }
            },

            Command::Search {
                model,
                criteria,
                offset,
                limit,
            } => {
                let params = Params::new().criteria(criteria).offset(offset).limit(limit);
                let response = self.request(&model, &Method::Search, &params)?;
                expect_ids("search", response).map(Output::Ids)
            }

            Command::Read { model, ids, fields } => {
                let params = Params::new().record_ids(ids).fields(fields);
                let response = self.request(&model, &Method::Read, &params)?;
                expect_records("read", response).map(Output::Records)
            }

            Command::SearchRead {
                model,
                criteria,
                fields,
                offset,
                limit,
            } => {
                let params = Params::new()
                    .criteria(criteria)
                    .fields(fields)
                    .offset(offset)
                    .limit(limit);
                let response = self.request(&model, &Method::SearchRead, &params)?;
                expect_records("search_read", response).map(Output::Records)
            }

            Command::SearchCount { model, criteria } => {
                let params = Params::new().criteria(criteria);
                let response = self.request(&model, &Method::SearchCount, &params)?;
                match response {
                    Value::Int(n) if n >= 0 => Ok(Output::Count(n as u64)),
                    other => Err(Error::unexpected("search_count", "non-negative int", &other)),
                }
            }

            Command::Write { model, ids, data } => {
                let params = Params::new().record_ids(ids).records_data(data);
                let response = self.request(&model, &Method::Write, &params)?;
                expect_bool("write", response).map(Output::Bool)
            }

            Command::Unlink { model, ids } => {
                let params = Params::new().record_ids(ids);
                let response = self.request(&model, &Method::Unlink, &params)?;
                expect_bool("unlink", response).map(Output::Bool)
            }

            Command::Execute {
                model,
                method,
                ids,
                kwargs,
            } => {
                let params = Params::new().record_ids(ids).extend(kwargs);
                let response = self.request(&model, &Method::from(method.as_str()), &params)?;
                match response {
                    // an action answering with a window description expects UI input
                    Value::Object(_) => Err(Error::NotSupported { model, method }),
                    other => Ok(Output::Value(other)),
                }
            }
        }
    }

    fn request(&self, model: &str, method: &Method, params: &Params) -> Result<Value> {
        let (args, kwargs) = params.build();
        self.dispatch(model, method.as_str(), args, kwargs)
    }

    /// Send one `execute_kw` call.
    ///
    /// The wire shape is fixed: `(database, uid, token, model, method, args,
    /// kwargs)`. The response is returned as received.
    pub fn dispatch(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: IndexMap<String, Value>,
    ) -> Result<Value> {
        debug!(
            target: "odoo::rpc",
            model,
            method,
            args = args.len(),
            kwargs = ?kwargs.keys().collect::<Vec<_>>(),
            "execute_kw"
        );

        let params = [
            Value::from(self.session.database()),
            Value::Int(self.session.uid()),
            Value::from(self.session.token()),
            Value::from(model),
            Value::from(method),
            Value::Array(args),
            Value::Object(kwargs),
        ];
        Ok(self.transport.call(Endpoint::Object, EXECUTE_KW, &params)?)
    }
}

// =============================================================================
// Response shape checks
// =============================================================================

fn expect_bool(method: &str, response: Value) -> Result<bool> {
    match response {
        Value::Bool(b) => Ok(b),
        other => Err(Error::unexpected(method, "bool", &other)),
    }
}

fn expect_id(method: &str, response: Value) -> Result<i64> {
    match response {
        Value::Int(id) => Ok(id),
        other => Err(Error::unexpected(method, "int", &other)),
    }
}

fn expect_ids(method: &str, response: Value) -> Result<Vec<i64>> {
    match response {
        Value::Array(items) => items
            .into_iter()
            .map(|item| expect_id(method, item))
            .collect(),
        other => Err(Error::unexpected(method, "list of ints", &other)),
    }
}

fn expect_records(method: &str, response: Value) -> Result<Vec<Record>> {
    match response {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => Ok(Record::from(fields)),
                other => Err(Error::unexpected(method, "record", &other)),
            })
            .collect(),
        other => Err(Error::unexpected(method, "list of records", &other)),
    }
}
