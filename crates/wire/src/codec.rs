//! XML-RPC encoding for [`Value`]
//!
//! | Value | XML-RPC |
//! |-------|---------|
//! | Null | `<nil/>` |
//! | Bool | `<boolean>0|1</boolean>` |
//! | Int (i32 range) | `<int>` |
//! | Int (outside i32) | `<i8>` |
//! | Float | `<double>` |
//! | String | `<string>` |
//! | Bytes | `<base64>` |
//! | Array | `<array><data>...</data></array>` |
//! | Object | `<struct><member>...</member></struct>` |
//!
//! On decode, `<i4>`, untyped `<value>text</value>` and
//! `<dateTime.iso8601>` (kept as a string) are accepted as well.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use indexmap::IndexMap;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use odoo_core::Value;

use crate::TransportError;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a `methodCall` document.
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(256);
    out.push_str("<?xml version=\"1.0\"?>\n<methodCall><methodName>");
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>");
    out
}

/// Encode a successful `methodResponse` document.
pub fn encode_response(value: &Value) -> String {
    let mut out = String::with_capacity(256);
    out.push_str("<?xml version=\"1.0\"?>\n<methodResponse><params><param>");
    write_value(&mut out, value);
    out.push_str("</param></params></methodResponse>");
    out
}

/// Encode a `fault` `methodResponse` document.
pub fn encode_fault(code: i64, message: &str) -> String {
    let mut fault = IndexMap::new();
    fault.insert("faultCode".to_string(), Value::Int(code));
    fault.insert("faultString".to_string(), Value::String(message.to_string()));

    let mut out = String::with_capacity(256);
    out.push_str("<?xml version=\"1.0\"?>\n<methodResponse><fault>");
    write_value(&mut out, &Value::Object(fault));
    out.push_str("</fault></methodResponse>");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Null => out.push_str("<nil/>"),
        Value::Bool(b) => {
            out.push_str("<boolean>");
            out.push(if *b { '1' } else { '0' });
            out.push_str("</boolean>");
        }
        Value::Int(i) => {
            let tag = if i32::try_from(*i).is_ok() { "int" } else { "i8" };
            out.push_str(&format!("<{tag}>{i}</{tag}>"));
        }
        Value::Float(f) => out.push_str(&format!("<double>{f}</double>")),
        Value::String(s) => {
            out.push_str("<string>");
            out.push_str(&escape(s.as_str()));
            out.push_str("</string>");
        }
        Value::Bytes(b) => {
            out.push_str("<base64>");
            out.push_str(&BASE64.encode(b));
            out.push_str("</base64>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Object(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                out.push_str("<member><name>");
                out.push_str(&escape(name.as_str()));
                out.push_str("</name>");
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
    }
    out.push_str("</value>");
}

// =============================================================================
// Decoding
// =============================================================================

/// Minimal element tree; XML-RPC documents are small and attribute-free.
#[derive(Debug, Default)]
struct Node {
    name: String,
    children: Vec<Node>,
    text: String,
}

impl Node {
    fn named(name: String) -> Self {
        Node {
            name,
            ..Node::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn require(&self, name: &str) -> Result<&Node, TransportError> {
        self.child(name).ok_or_else(|| {
            TransportError::decode(format!("<{}> is missing <{}>", self.name, name))
        })
    }
}

fn parse_tree(xml: &str) -> Result<Node, TransportError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Node> = vec![Node::default()];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| TransportError::decode(e.to_string()))?;
        match event {
            Event::Start(start) => {
                stack.push(Node::named(element_name(start.name().as_ref())?));
            }
            Event::Empty(start) => {
                let node = Node::named(element_name(start.name().as_ref())?);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| TransportError::decode("unbalanced end tag"))?;
                let parent = stack
                    .last_mut()
                    .ok_or_else(|| TransportError::decode("unbalanced end tag"))?;
                parent.children.push(node);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| TransportError::decode(e.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                let raw = data.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| TransportError::decode(e.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(TransportError::decode("document ended inside an element"));
    }
    stack
        .pop()
        .and_then(|root| root.children.into_iter().next())
        .ok_or_else(|| TransportError::decode("empty document"))
}

fn element_name(raw: &[u8]) -> Result<String, TransportError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| TransportError::decode(e.to_string()))
}

/// Decode a `methodResponse` document.
///
/// A `<fault>` response becomes [`TransportError::Fault`].
pub fn decode_response(xml: &str) -> Result<Value, TransportError> {
    let root = parse_tree(xml)?;
    if root.name != "methodResponse" {
        return Err(TransportError::decode(format!(
            "expected <methodResponse>, got <{}>",
            root.name
        )));
    }

    if let Some(fault) = root.child("fault") {
        let value = decode_value(fault.require("value")?)?;
        return Err(fault_from_value(value));
    }

    let value = root.require("params")?.require("param")?.require("value")?;
    decode_value(value)
}

/// Decode a `methodCall` document into its method name and params.
pub fn decode_call(xml: &str) -> Result<(String, Vec<Value>), TransportError> {
    let root = parse_tree(xml)?;
    if root.name != "methodCall" {
        return Err(TransportError::decode(format!(
            "expected <methodCall>, got <{}>",
            root.name
        )));
    }
    let method = root.require("methodName")?.text.trim().to_string();
    let params = match root.child("params") {
        Some(params) => params
            .children
            .iter()
            .filter(|c| c.name == "param")
            .map(|p| p.require("value").and_then(decode_value))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    Ok((method, params))
}

fn fault_from_value(value: Value) -> TransportError {
    let members = match value {
        Value::Object(members) => members,
        other => {
            return TransportError::Fault {
                code: String::new(),
                message: format!("{:?}", other),
            }
        }
    };
    let code = match members.get("faultCode") {
        Some(Value::Int(i)) => i.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => format!("{:?}", other),
        None => String::new(),
    };
    let message = members
        .get("faultString")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    TransportError::Fault { code, message }
}

fn decode_value(node: &Node) -> Result<Value, TransportError> {
    let typed = match node.children.first() {
        Some(typed) => typed,
        // <value>text</value> without a type element is a string
        None => return Ok(Value::String(node.text.clone())),
    };

    let text = typed.text.as_str();
    match typed.name.as_str() {
        "int" | "i4" | "i8" => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| TransportError::decode(format!("bad integer '{}': {}", text, e))),
        "boolean" => match text.trim() {
            "1" | "true" => Ok(Value::Bool(true)),
            "0" | "false" => Ok(Value::Bool(false)),
            other => Err(TransportError::decode(format!("bad boolean '{}'", other))),
        },
        "double" => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| TransportError::decode(format!("bad double '{}': {}", text, e))),
        "string" => Ok(Value::String(text.to_string())),
        "dateTime.iso8601" => Ok(Value::String(text.trim().to_string())),
        "base64" => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            BASE64
                .decode(compact)
                .map(Value::Bytes)
                .map_err(|e| TransportError::decode(format!("bad base64: {}", e)))
        }
        "nil" => Ok(Value::Null),
        "array" => {
            let data = typed.require("data")?;
            data.children
                .iter()
                .filter(|c| c.name == "value")
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "struct" => {
            let mut members = IndexMap::new();
            for member in typed.children.iter().filter(|c| c.name == "member") {
                let name = member.require("name")?.text.clone();
                let value = decode_value(member.require("value")?)?;
                members.insert(name, value);
            }
            Ok(Value::Object(members))
        }
        other => Err(TransportError::decode(format!(
            "unsupported value type <{}>",
            other
        ))),
    }
}
