//! Runtime type lattice.
//!
//! Every value has exactly one runtime type; a type reference accepts that
//! type and everything below it:
//!
//! ```text
//! Object
//! ├─ Nil, True, False, String, Symbol
//! ├─ Numeric ── Integer, Float
//! └─ Enumerable ── Array, Hash, Record ── Named(..)
//! ```
use std::borrow::Cow;
use std::fmt;

use crate::value::Value;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Object,
    Nil,
    True,
    False,
    Numeric,
    Integer,
    Float,
    String,
    Symbol,
    Enumerable,
    Array,
    Hash,
    /// Any record, whatever its name.
    Record,
    /// Records with this exact name.
    Named(String),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    /// Built-in descriptors by display name. Record names are not resolved here.
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "Object" => Type::Object,
            "Nil" => Type::Nil,
            "True" => Type::True,
            "False" => Type::False,
            "Numeric" => Type::Numeric,
            "Integer" => Type::Integer,
            "Float" => Type::Float,
            "String" => Type::String,
            "Symbol" => Type::Symbol,
            "Enumerable" => Type::Enumerable,
            "Array" => Type::Array,
            "Hash" => Type::Hash,
            "Record" => Type::Record,
            _ => return None,
        };
        Some(ty)
    }

    /// The concrete runtime type of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Nil => Type::Nil,
            Value::Bool(true) => Type::True,
            Value::Bool(false) => Type::False,
            Value::Integer(_) => Type::Integer,
            Value::Float(_) => Type::Float,
            Value::String(_) => Type::String,
            Value::Symbol(_) => Type::Symbol,
            Value::Array(_) => Type::Array,
            Value::Hash(_) => Type::Hash,
            Value::Record(r) => Type::Named(r.name.clone()),
        }
    }

    /// Reflexive subtype check: `self` is `other` or lies below it.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        if self == other || *other == Type::Object {
            return true;
        }
        match self {
            Type::Integer | Type::Float => *other == Type::Numeric,
            Type::Array | Type::Hash | Type::Record => *other == Type::Enumerable,
            Type::Named(_) => matches!(other, Type::Record | Type::Enumerable),
            _ => false,
        }
    }

    /// `value`'s runtime type is `self` or a subtype of it.
    pub fn includes(&self, value: &Value) -> bool {
        Type::of(value).is_subtype_of(self)
    }
}

/// Finite iterable container that is not a fixed-shape record.
pub fn is_sequence(value: &Value) -> bool {
    Type::Enumerable.includes(value) && !Type::Record.includes(value)
}

/// Elements of a sequence-shaped value, in order. Hashes yield `[key, value]`
/// pairs.
pub fn sequence_items(value: &Value) -> Option<Box<dyn Iterator<Item = Cow<'_, Value>> + '_>> {
    if !is_sequence(value) {
        return None;
    }
    match value {
        Value::Array(xs) => Some(Box::new(xs.iter().map(Cow::Borrowed))),
        Value::Hash(map) => Some(Box::new(
            map.iter().map(|(k, v)| Cow::Owned(Value::Array(vec![k.clone(), v.clone()]))),
        )),
        _ => None,
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Object => "Object",
            Type::Nil => "Nil",
            Type::True => "True",
            Type::False => "False",
            Type::Numeric => "Numeric",
            Type::Integer => "Integer",
            Type::Float => "Float",
            Type::String => "String",
            Type::Symbol => "Symbol",
            Type::Enumerable => "Enumerable",
            Type::Array => "Array",
            Type::Hash => "Hash",
            Type::Record => "Record",
            Type::Named(name) => name.as_str(),
        };
        f.write_str(name)
    }
}
