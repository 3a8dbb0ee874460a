//! Unclassified pattern literals.
//!
//! A `Literal` is what a caller writes: types, one-element sequence literals,
//! one-entry map literals, predicate objects, or arbitrary data. Nothing is
//! checked here. Arity and shape are judged by [`crate::lower`] when a
//! validator is built, and bad literals surface as validation failures.
use std::fmt;
use std::sync::Arc;

use crate::predicate::{KindOf, Predicate, Satisfies};
use crate::types::Type;
use crate::value::Value;

/// Symbol name that stands for "true or false".
pub const BOOLEAN: &str = "boolean";

#[derive(Clone, Debug)]
pub enum Literal {
    Type(Type),
    Seq(Vec<Literal>),
    Map(Vec<(Literal, Literal)>),
    Predicate(Arc<dyn Predicate>),
    Data(Value),
}

impl Literal {
    /// The `:boolean` alias.
    pub fn boolean() -> Self {
        Literal::Data(Value::sym(BOOLEAN))
    }

    /// `[element]`
    pub fn seq(element: impl Into<Literal>) -> Self {
        Literal::Seq(vec![element.into()])
    }

    /// Sequence literal with any number of element descriptions.
    pub fn seq_of<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        Literal::Seq(elements.into_iter().map(Into::into).collect())
    }

    /// `{key => value}`
    pub fn map(key: impl Into<Literal>, value: impl Into<Literal>) -> Self {
        Literal::Map(vec![(key.into(), value.into())])
    }

    /// Map literal with any number of entries.
    pub fn map_of<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Literal>,
        V: Into<Literal>,
    {
        Literal::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn predicate(p: impl Predicate + 'static) -> Self {
        Literal::Predicate(Arc::new(p))
    }

    /// Read a literal out of plain JSON data.
    ///
    /// - `"String"`, `"Integer"`, ... → built-in type descriptors
    /// - `":name"` → symbol data (so `":boolean"` is the boolean alias)
    /// - arrays → sequence literals, objects → map literals whose keys are
    ///   read back through the same rules
    /// - anything else stays data and will not classify
    pub fn from_json(json: &serde_json::Value) -> Self {
        use serde_json::Value as J;
        match json {
            J::String(s) => literal_from_str(s),
            J::Array(xs) => Literal::Seq(xs.iter().map(Literal::from_json).collect()),
            J::Object(map) => Literal::Map(
                map.iter()
                    .map(|(k, v)| (literal_from_str(k), Literal::from_json(v)))
                    .collect(),
            ),
            other => Literal::Data(Value::from(other.clone())),
        }
    }
}

fn literal_from_str(s: &str) -> Literal {
    if let Some(ty) = Type::from_name(s) {
        return Literal::Type(ty);
    }
    match s.strip_prefix(':') {
        Some(name) if !name.is_empty() => Literal::Data(Value::sym(name)),
        _ => Literal::Data(Value::str(s)),
    }
}

impl From<Type> for Literal {
    fn from(ty: Type) -> Self { Literal::Type(ty) }
}

impl From<Value> for Literal {
    fn from(v: Value) -> Self { Literal::Data(v) }
}

impl From<KindOf> for Literal {
    fn from(p: KindOf) -> Self { Literal::predicate(p) }
}

impl From<Satisfies> for Literal {
    fn from(p: Satisfies) -> Self { Literal::predicate(p) }
}

impl From<Arc<dyn Predicate>> for Literal {
    fn from(p: Arc<dyn Predicate>) -> Self { Literal::Predicate(p) }
}

/// Literal as written: `[String, Symbol]`, `{Symbol => [String]}`, `:boolean`.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Type(ty) => write!(f, "{ty}"),
            Literal::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Literal::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
            Literal::Predicate(p) => f.write_str(&p.description()),
            Literal::Data(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_like_source_form() {
        let lit = Literal::map(Type::Symbol, Literal::seq(Type::String));
        assert_eq!(lit.to_string(), "{Symbol => [String]}");
        assert_eq!(Literal::seq_of([Type::String, Type::Symbol]).to_string(), "[String, Symbol]");
        assert_eq!(Literal::boolean().to_string(), ":boolean");
        assert_eq!(Literal::from(KindOf(Type::Integer)).to_string(), "be a kind of Integer");
    }

    #[test]
    fn json_strings_name_types_or_symbols() {
        assert!(matches!(Literal::from_json(&json!("Integer")), Literal::Type(Type::Integer)));
        assert!(matches!(
            Literal::from_json(&json!(":boolean")),
            Literal::Data(Value::Symbol(ref s)) if s == BOOLEAN
        ));
        assert!(matches!(
            Literal::from_json(&json!("Strng")),
            Literal::Data(Value::String(ref s)) if s == "Strng"
        ));
        assert!(matches!(Literal::from_json(&json!(":")), Literal::Data(Value::String(_))));
    }

    #[test]
    fn json_containers_keep_their_arity() {
        let lit = Literal::from_json(&json!([{"Symbol": ["String"]}, "Integer"]));
        assert_eq!(lit.to_string(), "[{Symbol => [String]}, Integer]");
        let Literal::Seq(items) = lit else { panic!("expected a sequence literal") };
        assert_eq!(items.len(), 2);

        let lit = Literal::from_json(&json!(42));
        assert!(matches!(lit, Literal::Data(Value::Integer(42))));
    }
}
