//! Dynamically typed record values and their report rendering.
//!
//! Pipeline stages hand over loosely shaped data (index lists, per-feature
//! statistics, nested split tables). `Value` carries that data and renders it
//! in the textual form existing ATOML reports already use: `None`, `True`,
//! `[1, 2, 3]`, `{'average': 0.5}` and so on.
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// One field value inside a stage record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing entry; also the padding marker in split tables.
    Null,
    Bool(bool),
    /// Wide enough for every JSON integer, signed or unsigned.
    Int(i128),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    /// Nested mapping such as `{'average': 0.4, 'all': [...]}`.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short, stable name of the variant for shape errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }

    /// Borrow the items of a sequence value.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the entries of a mapping value.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Render a value as it appears nested inside a sequence or mapping.
    ///
    /// Strings are quoted here but bare at the top level.
    fn write_nested(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => out.write_str(&quote_str(text)),
            other => other.write_plain(out),
        }
    }

    fn write_plain(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => out.write_str("None"),
            Value::Bool(true) => out.write_str("True"),
            Value::Bool(false) => out.write_str("False"),
            Value::Int(n) => write!(out, "{n}"),
            Value::Float(x) => out.write_str(&format_float(*x)),
            Value::Str(text) => out.write_str(text),
            Value::Seq(items) => {
                out.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.write_str(", ")?;
                    }
                    item.write_nested(out)?;
                }
                out.write_str("]")
            }
            Value::Map(map) => {
                out.write_str("{")?;
                for (idx, (key, item)) in map.iter().enumerate() {
                    if idx > 0 {
                        out.write_str(", ")?;
                    }
                    write!(out, "'{key}': ")?;
                    item.write_nested(out)?;
                }
                out.write_str("}")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_plain(f)
    }
}

/// Quote a string the way it appears inside a rendered list: single quotes
/// unless the text holds a single quote and no double quote, with
/// backslashes and control characters escaped so one value stays on one line.
fn quote_str(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == quote => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push(quote);
    quoted
}

/// Format a float as the shortest round-trip text, keeping a trailing `.0`
/// on integral values and switching to `1e-05` style exponents outside
/// `[1e-4, 1e16)`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{x:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => match exp.parse::<i32>() {
                Ok(exp) => {
                    let sign = if exp < 0 { '-' } else { '+' };
                    format!("{mantissa}e{sign}{:02}", exp.abs())
                }
                Err(_) => sci,
            },
            None => sci,
        };
    }
    let text = format!("{x}");
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(num) => {
                if let Some(n) = num.as_i64() {
                    Value::Int(i128::from(n))
                } else if let Some(n) = num.as_u64() {
                    Value::Int(i128::from(n))
                } else {
                    Value::Float(num.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(text) => Value::Str(text),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, item)| (key, Value::from(item)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(i128::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i128::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Int(i128::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(item: Option<T>) -> Self {
        item.map_or(Value::Null, Into::into)
    }
}
