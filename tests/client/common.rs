//! In-memory Odoo server reached through the XML-RPC codec.
//!
//! Every call is encoded to an XML document, decoded on the "server" side,
//! answered from an in-memory record store and sent back as XML, so the
//! tests exercise the same codec path as the HTTP transport.

#![allow(dead_code)]

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use odoo_api::{Client, ClientOptions, Credentials, Endpoint, Transport, TransportError, Value};
use odoo_wire::codec;

pub const DATABASE: &str = "acme";
pub const USERNAME: &str = "api@acme.com";
pub const TOKEN: &str = "0123456789abcdef";
pub const UID: i64 = 2;

type Row = IndexMap<String, Value>;

/// Fault answered by the fake server.
struct Fault(i64, String);

fn fault(code: i64, message: impl Into<String>) -> Fault {
    Fault(code, message.into())
}

#[derive(Default)]
pub struct FakeOdoo {
    models: Mutex<IndexMap<String, Vec<Row>>>,
    next_id: Mutex<i64>,
    requests: Mutex<Vec<String>>,
}

impl FakeOdoo {
    pub fn new() -> Arc<Self> {
        let server = FakeOdoo {
            next_id: Mutex::new(100),
            ..Default::default()
        };
        Arc::new(server)
    }

    /// Server seeded with partners and sale orders.
    pub fn seeded() -> Arc<Self> {
        let server = Self::new();
        server.insert(
            "res.partner",
            &[
                ("id", Value::Int(7)),
                ("name", Value::from("Acme")),
                ("is_company", Value::Bool(true)),
            ],
        );
        server.insert(
            "res.partner",
            &[
                ("id", Value::Int(8)),
                ("name", Value::from("Jane Doe")),
                ("is_company", Value::Bool(false)),
            ],
        );
        server.insert(
            "sale.order",
            &[
                ("id", Value::Int(1)),
                ("name", Value::from("S00001")),
                ("state", Value::from("draft")),
                (
                    "partner_id",
                    Value::Array(vec![Value::Int(7), Value::from("Acme")]),
                ),
                ("amount_total", Value::Float(120.5)),
            ],
        );
        server.insert(
            "sale.order",
            &[
                ("id", Value::Int(2)),
                ("name", Value::from("S00002")),
                ("state", Value::from("sale")),
                ("partner_id", Value::Bool(false)),
                ("amount_total", Value::Float(0.0)),
            ],
        );
        server.insert(
            "ir.model.fields",
            &[
                ("id", Value::Int(501)),
                ("name", Value::from("state")),
                ("field_description", Value::from("Status")),
                ("model_id", Value::from("sale.order")),
                ("ttype", Value::from("selection")),
                ("state", Value::from("base")),
                ("relation", Value::Bool(false)),
            ],
        );
        server.insert(
            "ir.model.fields",
            &[
                ("id", Value::Int(502)),
                ("name", Value::from("partner_id")),
                ("field_description", Value::from("Customer")),
                ("model_id", Value::from("sale.order")),
                ("ttype", Value::from("many2one")),
                ("state", Value::from("base")),
                ("relation", Value::from("res.partner")),
            ],
        );
        server
    }

    pub fn insert(&self, model: &str, fields: &[(&str, Value)]) {
        let row: Row = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.models
            .lock()
            .entry(model.to_string())
            .or_default()
            .push(row);
    }

    /// Raw XML request bodies, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn record(&self, model: &str, id: i64) -> Option<Row> {
        self.models
            .lock()
            .get(model)
            .and_then(|rows| rows.iter().find(|r| row_id(r) == Some(id)).cloned())
    }

    fn handle(&self, endpoint: Endpoint, method: &str, params: Vec<Value>) -> Result<Value, Fault> {
        match (endpoint, method) {
            (Endpoint::Common, "version") => {
                let mut version = IndexMap::new();
                version.insert("server_version".to_string(), Value::from("17.0"));
                version.insert("protocol_version".to_string(), Value::Int(1));
                Ok(Value::Object(version))
            }
            (Endpoint::Common, "authenticate") => {
                if params.len() != 4 {
                    return Err(fault(1, "authenticate takes 4 params"));
                }
                let valid = params[0].as_str() == Some(DATABASE)
                    && params[1].as_str() == Some(USERNAME)
                    && params[2].as_str() == Some(TOKEN);
                Ok(if valid { Value::Int(UID) } else { Value::Bool(false) })
            }
            (Endpoint::Object, "execute_kw") => self.execute_kw(params),
            _ => Err(fault(1, format!("unknown method {}", method))),
        }
    }

    fn execute_kw(&self, params: Vec<Value>) -> Result<Value, Fault> {
        if params.len() != 7 {
            return Err(fault(1, "execute_kw takes 7 params"));
        }
        if params[1].as_int() != Some(UID) || params[2].as_str() != Some(TOKEN) {
            return Err(fault(3, "Access Denied"));
        }
        let model = params[3].as_str().unwrap_or_default().to_string();
        let method = params[4].as_str().unwrap_or_default().to_string();
        let args = params[5].as_array().unwrap_or_default().to_vec();
        let kwargs = params[6].as_object().cloned().unwrap_or_default();

        let mut models = self.models.lock();
        let rows = models.entry(model.clone()).or_default();

        match method.as_str() {
            "check_access_rights" => Ok(Value::Bool(model != "account.move")),
            "search" | "search_count" | "search_read" => {
                let domain = args.first().cloned().unwrap_or(Value::Array(vec![]));
                let mut matched: Vec<&Row> = Vec::new();
                for row in rows.iter() {
                    if matches_domain(row, &domain)? {
                        matched.push(row);
                    }
                }
                if method == "search_count" {
                    return Ok(Value::Int(matched.len() as i64));
                }
                let offset = kwargs.get("offset").and_then(Value::as_int).unwrap_or(0) as usize;
                let limit = kwargs.get("limit").and_then(Value::as_int);
                let page = matched
                    .into_iter()
                    .skip(offset)
                    .take(limit.map(|l| l as usize).unwrap_or(usize::MAX));
                if method == "search" {
                    Ok(Value::Array(
                        page.filter_map(row_id).map(Value::Int).collect(),
                    ))
                } else {
                    Ok(Value::Array(
                        page.map(|row| project(row, kwargs.get("fields"))).collect(),
                    ))
                }
            }
            "read" => {
                let ids = id_list(args.first())?;
                Ok(Value::Array(
                    rows.iter()
                        .filter(|row| row_id(row).map_or(false, |id| ids.contains(&id)))
                        .map(|row| project(row, kwargs.get("fields")))
                        .collect(),
                ))
            }
            "create" => {
                let mut next_id = self.next_id.lock();
                let mut create = |values: &IndexMap<String, Value>| {
                    *next_id += 1;
                    let mut row = Row::new();
                    row.insert("id".to_string(), Value::Int(*next_id));
                    row.extend(values.clone());
                    rows.push(row);
                    *next_id
                };
                match args.first() {
                    Some(Value::Object(values)) => Ok(Value::Int(create(values))),
                    Some(Value::Array(items)) => {
                        let mut ids = Vec::new();
                        for item in items {
                            let values = item
                                .as_object()
                                .ok_or_else(|| fault(1, "create expects mappings"))?;
                            ids.push(Value::Int(create(values)));
                        }
                        Ok(Value::Array(ids))
                    }
                    _ => Err(fault(1, "create expects values")),
                }
            }
            "write" => {
                let ids = id_list(args.first())?;
                let values = args
                    .get(1)
                    .and_then(Value::as_object)
                    .ok_or_else(|| fault(1, "write expects values"))?;
                for row in rows.iter_mut() {
                    if row_id(row).map_or(false, |id| ids.contains(&id)) {
                        row.extend(values.clone());
                    }
                }
                Ok(Value::Bool(true))
            }
            "unlink" => {
                let ids = id_list(args.first())?;
                rows.retain(|row| !row_id(row).map_or(false, |id| ids.contains(&id)));
                Ok(Value::Bool(true))
            }
            "action_confirm" => {
                let ids = id_list(args.first())?;
                for row in rows.iter_mut() {
                    if row_id(row).map_or(false, |id| ids.contains(&id)) {
                        row.insert("state".to_string(), Value::from("sale"));
                    }
                }
                Ok(Value::Bool(true))
            }
            "action_view_invoice" => {
                let mut action = IndexMap::new();
                action.insert("type".to_string(), Value::from("ir.actions.act_window"));
                action.insert("res_model".to_string(), Value::from("account.move"));
                Ok(Value::Object(action))
            }
            other => Err(fault(
                2,
                format!("The method '{}' does not exist on the model '{}'", other, model),
            )),
        }
    }
}

impl Transport for FakeOdoo {
    fn call(
        &self,
        endpoint: Endpoint,
        method: &str,
        params: &[Value],
    ) -> Result<Value, TransportError> {
        let request = codec::encode_call(method, params);
        self.requests.lock().push(request.clone());

        let (method, params) = codec::decode_call(&request)?;
        let response = match self.handle(endpoint, &method, params) {
            Ok(value) => codec::encode_response(&value),
            Err(Fault(code, message)) => codec::encode_fault(code, &message),
        };
        codec::decode_response(&response)
    }
}

fn row_id(row: &Row) -> Option<i64> {
    row.get("id").and_then(Value::as_int)
}

fn id_list(value: Option<&Value>) -> Result<Vec<i64>, Fault> {
    value
        .and_then(Value::as_array)
        .ok_or_else(|| fault(1, "expected a list of ids"))?
        .iter()
        .map(|v| v.as_int().ok_or_else(|| fault(1, "ids must be integers")))
        .collect()
}

fn project(row: &Row, fields: Option<&Value>) -> Value {
    let wanted: Option<Vec<&str>> = fields
        .and_then(Value::as_array)
        .map(|f| f.iter().filter_map(Value::as_str).collect());
    let projected = row
        .iter()
        .filter(|(k, _)| match &wanted {
            Some(wanted) => k.as_str() == "id" || wanted.contains(&k.as_str()),
            None => true,
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Value::Object(projected)
}

/// Implicit-AND domains of `=`, `!=` and `in` triplets; `&` is accepted.
fn matches_domain(row: &Row, domain: &Value) -> Result<bool, Fault> {
    let terms = domain
        .as_array()
        .ok_or_else(|| fault(1, "domain must be a list"))?;
    for term in terms {
        match term {
            Value::String(op) if op == "&" => continue,
            Value::Array(parts) if parts.len() == 3 => {
                let field = parts[0].as_str().unwrap_or_default();
                let op = parts[1].as_str().unwrap_or_default();
                let actual = row.get(field).cloned().unwrap_or(Value::Bool(false));
                let actual = match actual {
                    // many-to-one compares on the id
                    Value::Array(pair) if pair.len() == 2 => pair[0].clone(),
                    other => other,
                };
                let hit = match op {
                    "=" => actual == parts[2],
                    "!=" => actual != parts[2],
                    "in" => parts[2]
                        .as_array()
                        .map_or(false, |set| set.contains(&actual)),
                    other => return Err(fault(1, format!("unsupported operator {}", other))),
                };
                if !hit {
                    return Ok(false);
                }
            }
            other => return Err(fault(1, format!("unsupported domain term {:?}", other))),
        }
    }
    Ok(true)
}

pub fn credentials() -> Credentials {
    Credentials::new("https://acme.odoo.com", DATABASE, USERNAME, TOKEN)
}

pub fn connect(server: &Arc<FakeOdoo>) -> Client {
    connect_with(server, ClientOptions::new())
}

pub fn connect_with(server: &Arc<FakeOdoo>, options: ClientOptions) -> Client {
    Client::with_transport(server.clone(), credentials(), options).unwrap()
}
