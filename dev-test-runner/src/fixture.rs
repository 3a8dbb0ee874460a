//! Fixture files: declarative validation cases in JSON.
//!
//! ```json
//! { "cases": [
//!   { "name": "strings", "patterns": [["String"]], "value": ["a", 1],
//!     "expect": "fail", "message_contains": ["expected 1"] }
//! ] }
//! ```
//!
//! Plain JSON covers most values and patterns. The `$` forms cover the rest:
//!
//! | form                                   | meaning                          |
//! |----------------------------------------|----------------------------------|
//! | `{"$sym": "foo"}`                      | symbol value `:foo`              |
//! | `{"$symbols": {"foo": 1}}`             | hash with symbol keys            |
//! | `{"$hash": [[k, v], ...]}`             | hash with arbitrary keys         |
//! | `{"$record": "Point", "fields": {..}}` | record value                     |
//! | `{"$one_of": [p, ...], "or_nil": b}`   | nested validator (pattern leaf)  |
//! | `{"$kind_of": "String"}`               | `KindOf` predicate leaf          |
//! | `{"$map": [[kp, vp], ...]}`            | map literal with pattern keys    |
//! | `{"$named": "Point"}`                  | named record type                |
//!
//! Any other object is plain data, even with `$`-prefixed keys. A directive
//! takes no keys beyond the ones listed next to it.
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use type_pattern::{KindOf, Literal, Record, Type, Validator, Value};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureFile {
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub name: String,
    pub patterns: Vec<Json>,
    #[serde(default)]
    pub nullable: bool,
    pub value: Json,
    pub expect: Expect,
    #[serde(default)]
    pub message_contains: Vec<String>,
    /// Regex the rendered message must match.
    #[serde(default)]
    pub message_matches: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expect {
    Pass,
    Fail,
}

// ------------------------------- Loading ---------------------------------- //

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path(src: &str) -> Result<FixtureFile> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

pub fn load(path: &Path) -> Result<FixtureFile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture file {}", path.display()))?;
    from_str_with_path(&source).with_context(|| format!("invalid fixture file {}", path.display()))
}

impl Case {
    pub fn validator(&self) -> Result<Validator> {
        let literals = self
            .patterns
            .iter()
            .map(decode_literal)
            .collect::<Result<Vec<_>>>()?;
        let validator = Validator::new(literals)?;
        Ok(if self.nullable { validator.or_nil() } else { validator })
    }

    pub fn value(&self) -> Result<Value> {
        decode_value(&self.value)
    }
}

// ------------------------------- Decoding --------------------------------- //

/// Directive name and the plain keys allowed next to it.
type Directives = &'static [(&'static str, &'static [&'static str])];

const VALUE_DIRECTIVES: Directives = &[
    ("$sym", &[]),
    ("$symbols", &[]),
    ("$hash", &[]),
    ("$record", &["fields"]),
];

const PATTERN_DIRECTIVES: Directives = &[
    ("$one_of", &["or_nil"]),
    ("$kind_of", &[]),
    ("$map", &[]),
    ("$named", &[]),
];

/// The directive an object spells, if any. Objects without a known directive
/// key are plain data, `$`-prefixed keys included.
fn directive<'a>(
    map: &'a serde_json::Map<String, Json>,
    known: &[Directives],
) -> Result<Option<(&'static str, &'a Json)>> {
    let found = map.iter().find_map(|(key, arg)| {
        known
            .iter()
            .flat_map(|table| table.iter())
            .find(|(name, _)| *name == key.as_str())
            .map(|(name, extras)| (*name, *extras, arg))
    });
    let Some((name, extras, arg)) = found else {
        return Ok(None);
    };
    if let Some(stray) = map.keys().find(|k| k.as_str() != name && !extras.contains(&k.as_str())) {
        bail!("unexpected key {stray} next to {name}");
    }
    Ok(Some((name, arg)))
}

pub fn decode_value(json: &Json) -> Result<Value> {
    match json {
        Json::Array(xs) => Ok(Value::Array(xs.iter().map(decode_value).collect::<Result<_>>()?)),
        Json::Object(map) => match directive(map, &[VALUE_DIRECTIVES])? {
            Some(("$sym", Json::String(name))) => Ok(Value::sym(name.as_str())),
            Some(("$symbols", Json::Object(entries))) => Ok(Value::Hash(
                entries
                    .iter()
                    .map(|(k, v)| -> Result<(Value, Value)> { Ok((Value::sym(k.as_str()), decode_value(v)?)) })
                    .collect::<Result<_>>()?,
            )),
            Some(("$hash", Json::Array(pairs))) => Ok(Value::Hash(
                pairs
                    .iter()
                    .map(|pair| -> Result<(Value, Value)> {
                        let (k, v) = as_pair(pair)?;
                        Ok((decode_value(k)?, decode_value(v)?))
                    })
                    .collect::<Result<_>>()?,
            )),
            Some(("$record", Json::String(name))) => {
                let fields = match map.get("fields") {
                    Some(Json::Object(fields)) => fields
                        .iter()
                        .map(|(k, v)| -> Result<(String, Value)> { Ok((k.clone(), decode_value(v)?)) })
                        .collect::<Result<_>>()?,
                    None => Default::default(),
                    Some(other) => bail!("record fields must be an object, got {other}"),
                };
                Ok(Value::Record(Record { name: name.clone(), fields }))
            }
            Some((key, arg)) => bail!("malformed {key} directive: {arg}"),
            None => Ok(Value::Hash(
                map.iter()
                    .map(|(k, v)| -> Result<(Value, Value)> { Ok((Value::str(k.as_str()), decode_value(v)?)) })
                    .collect::<Result<_>>()?,
            )),
        },
        scalar => Ok(Value::from(scalar.clone())),
    }
}

pub fn decode_literal(json: &Json) -> Result<Literal> {
    match json {
        Json::Array(xs) => Ok(Literal::Seq(xs.iter().map(decode_literal).collect::<Result<_>>()?)),
        Json::Object(map) => match directive(map, &[PATTERN_DIRECTIVES, VALUE_DIRECTIVES])? {
            Some(("$one_of", Json::Array(alternatives))) => {
                let literals = alternatives.iter().map(decode_literal).collect::<Result<Vec<_>>>()?;
                let validator = Validator::new(literals)?;
                let or_nil = matches!(map.get("or_nil"), Some(Json::Bool(true)));
                Ok(Literal::from(if or_nil { validator.or_nil() } else { validator }))
            }
            Some(("$kind_of", Json::String(name))) => {
                let ty = Type::from_name(name).ok_or_else(|| anyhow!("unknown type name {name}"))?;
                Ok(Literal::from(KindOf(ty)))
            }
            Some(("$map", Json::Array(pairs))) => Ok(Literal::Map(
                pairs
                    .iter()
                    .map(|pair| -> Result<(Literal, Literal)> {
                        let (k, v) = as_pair(pair)?;
                        Ok((decode_literal(k)?, decode_literal(v)?))
                    })
                    .collect::<Result<_>>()?,
            )),
            Some(("$named", Json::String(name))) => Ok(Literal::from(Type::named(name.as_str()))),
            Some(("$sym", _)) | Some(("$symbols", _)) | Some(("$hash", _)) | Some(("$record", _)) => {
                // plain data; only `:boolean` classifies, the rest is malformed
                Ok(Literal::Data(decode_value(json)?))
            }
            Some((key, arg)) => bail!("malformed {key} directive: {arg}"),
            None => Ok(Literal::Map(
                map.iter()
                    .map(|(k, v)| -> Result<(Literal, Literal)> {
                        Ok((Literal::from_json(&Json::String(k.clone())), decode_literal(v)?))
                    })
                    .collect::<Result<_>>()?,
            )),
        },
        other => Ok(Literal::from_json(other)),
    }
}

fn as_pair(json: &Json) -> Result<(&Json, &Json)> {
    match json.as_array().map(Vec::as_slice) {
        Some([k, v]) => Ok((k, v)),
        _ => bail!("expected a [key, value] pair, got {json}"),
    }
}
