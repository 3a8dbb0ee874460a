//! Dynamic value tree checked by validators.
//!
//! `Value` is the already-materialized data a pattern is matched against. It
//! distinguishes strings from symbols and keyed records from plain hashes,
//! since patterns can tell those apart.
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(i64),
    Float(OrderedFloat<f64>),
    String(String),
    Symbol(String),
    Array(Vec<Value>),
    /// Insertion-ordered; keys may be any value.
    Hash(IndexMap<Value, Value>),
    Record(Record),
}

/// Fixed-shape named record. Iterable over its fields, but never a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub fields: IndexMap<String, Value>,
}

// ------------------------------ Constructors ------------------------------ //

impl Value {
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn str(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn hash<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Hash(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn record<I, V>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<Value>,
    {
        Value::Record(Record {
            name: name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.to_string(), v.into())).collect(),
        })
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Integer(i) }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Integer(i64::from(i)) }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Float(OrderedFloat(f)) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self {
        x.map(Into::into).unwrap_or(Value::Nil)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self { Value::Record(r) }
}

/// JSON has no symbols or records: objects become string-keyed hashes.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match v {
            J::Null => Value::Nil,
            J::Bool(b) => Value::Bool(b),
            J::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(OrderedFloat(n.as_f64().unwrap_or(f64::NAN))),
            },
            J::String(s) => Value::String(s),
            J::Array(xs) => Value::Array(xs.into_iter().map(Value::from).collect()),
            J::Object(map) => Value::Hash(
                map.into_iter().map(|(k, v)| (Value::String(k), Value::from(v))).collect(),
            ),
        }
    }
}

// ------------------------------- Hash / Eq -------------------------------- //

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.hash(state),
            Value::String(s) | Value::Symbol(s) => s.hash(state),
            Value::Array(xs) => xs.hash(state),
            // map equality ignores entry order, so only the size is hashed
            Value::Hash(map) => map.len().hash(state),
            Value::Record(r) => {
                r.name.hash(state);
                r.fields.len().hash(state);
            }
        }
    }
}

// -------------------------------- Display --------------------------------- //

/// Diagnostic rendering: `nil`, `"text"`, `:sym`, `[1, 2]`, `{k => v}`,
/// `Point { x: 1 }`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{:?}", x.0),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, ":{s}"),
            Value::Array(xs) => {
                f.write_str("[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
            Value::Hash(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
            Value::Record(r) => write!(f, "{r}"),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, (k, v)) in self.fields.iter().enumerate() {
            f.write_str(if i > 0 { ", " } else { " " })?;
            write!(f, "{k}: {v}")?;
        }
        if !self.fields.is_empty() { f.write_str(" ")?; }
        f.write_str("}")
    }
}

// ------------------------------- Tests ------------------------------------ //
