//! Recursive matcher.
//!
//! `match_pattern` walks one pattern against one value, depth first, and stops
//! at the first failing element of any container. The returned `Diagnostic`
//! therefore describes exactly one path: the container frames from the top
//! down to the leaf that failed.
use std::fmt::Display;

use tracing::trace;

use crate::diagnostic::Diagnostic;
use crate::ir::{Malformed, Pattern};
use crate::predicate::Predicate;
use crate::types::sequence_items;
use crate::value::Value;

/// `"expected <value> to be type of <expected>[ or nil]"`
pub fn type_of_message(value: &Value, expected: &dyn Display, or_nil: bool) -> String {
    let suffix = if or_nil { " or nil" } else { "" };
    format!("expected {value} to be type of {expected}{suffix}")
}

/// `or_nil` only affects the wording of this frame; nested frames are
/// evaluated without it.
pub fn match_pattern(pattern: &Pattern, value: &Value, or_nil: bool) -> Result<(), Diagnostic> {
    trace!(%pattern, %value, "match");
    match pattern {
        Pattern::TypeRef(ty) => {
            if ty.includes(value) {
                return Ok(());
            }
            Err(mismatch(value, pattern, or_nil))
        }
        Pattern::Boolean => {
            if matches!(value, Value::Bool(_)) {
                return Ok(());
            }
            Err(mismatch(value, pattern, false))
        }
        Pattern::Sequence(element) => match_sequence(pattern, element, value, or_nil),
        Pattern::Mapping(key, val) => match_mapping(pattern, key, val, value, or_nil),
        Pattern::Predicate(p) => match_predicate(p.as_ref(), value),
        // arity problems are reported without looking at the value
        Pattern::Malformed(Malformed::SequenceArity { literal }) => Err(Diagnostic::new(format!(
            "sequence pattern must have exactly 1 element, but given {literal}"
        ))),
        Pattern::Malformed(Malformed::MappingArity { literal }) => Err(Diagnostic::new(format!(
            "map pattern must have exactly 1 entry, but given {literal}"
        ))),
        Pattern::Malformed(Malformed::Unrecognized { literal }) => {
            Err(Diagnostic::new(type_of_message(value, literal, or_nil)))
        }
    }
}

fn mismatch(value: &Value, pattern: &Pattern, or_nil: bool) -> Diagnostic {
    Diagnostic::new(type_of_message(value, pattern, or_nil))
}

fn match_sequence(
    pattern: &Pattern,
    element: &Pattern,
    value: &Value,
    or_nil: bool,
) -> Result<(), Diagnostic> {
    let Some(mut items) = sequence_items(value) else {
        return Err(mismatch(value, pattern, or_nil));
    };
    items
        .try_for_each(|item| match_pattern(element, &item, false))
        .map_err(|inner| inner.wrap(type_of_message(value, pattern, or_nil)))
}

fn match_mapping(
    pattern: &Pattern,
    key: &Pattern,
    val: &Pattern,
    value: &Value,
    or_nil: bool,
) -> Result<(), Diagnostic> {
    let Value::Hash(entries) = value else {
        return Err(mismatch(value, pattern, or_nil));
    };
    entries
        .iter()
        .try_for_each(|(k, v)| {
            match_pattern(key, k, false)?;
            match_pattern(val, v, false)
        })
        .map_err(|inner| inner.wrap(type_of_message(value, pattern, or_nil)))
}

fn match_predicate(predicate: &dyn Predicate, value: &Value) -> Result<(), Diagnostic> {
    predicate.test(value).map_err(|failure| {
        if failure.is_blank() {
            // every failure must say something
            return Diagnostic::new(format!("expected {value} to {}", predicate.description()));
        }
        failure
    })
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Literal;
    use crate::lower::lower_to_ir;
    use crate::predicate::{KindOf, Satisfies};
    use crate::types::Type;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn check(lit: impl Into<Literal>, value: impl Into<Value>) -> Result<(), String> {
        match_pattern(&lower_to_ir(&lit.into()), &value.into(), false).map_err(|d| d.render())
    }

    #[test]
    fn type_refs_accept_subtypes() {
        assert!(check(Type::Numeric, 1).is_ok());
        assert!(check(Type::Numeric, 1.5).is_ok());
        assert!(check(Type::Object, Value::Nil).is_ok());
        assert_eq!(
            check(Type::Symbol, "foo").unwrap_err(),
            r#"expected "foo" to be type of Symbol"#
        );
    }

    #[test]
    fn boolean_alias_takes_only_booleans() {
        assert!(check(Literal::boolean(), true).is_ok());
        assert!(check(Literal::boolean(), false).is_ok());
        assert_eq!(check(Literal::boolean(), 1).unwrap_err(), "expected 1 to be type of :boolean");
        assert!(check(Literal::boolean(), Value::Nil).is_err());
        assert!(check(Literal::boolean(), Value::sym("foo")).is_err());
    }

    #[test]
    fn sequences_stop_at_first_bad_element() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = seen.clone();
        let spy = Satisfies::new("be a string", move |v| {
            log.lock().unwrap().push(v.clone());
            matches!(v, Value::String(_))
        });
        let err = check(Literal::seq(spy), Value::array([Value::str("a"), Value::from(1), Value::str("c")]));
        assert!(err.is_err());
        assert_eq!(*seen.lock().unwrap(), vec![Value::str("a"), Value::from(1)]);
    }

    #[test]
    fn sequence_failure_wraps_the_element_failure() {
        let err = check(Literal::seq(Type::String), Value::from(json!(["a", 1]))).unwrap_err();
        assert_eq!(
            err,
            "expected [\"a\", 1] to be type of [String]\n  (expected 1 to be type of String)"
        );
    }

    #[test]
    fn hashes_iterate_as_pairs_under_sequence_patterns() {
        let value = Value::hash([(Value::sym("foo"), 1)]);
        let err = check(Literal::seq(Type::String), value).unwrap_err();
        assert!(err.contains("expected [:foo, 1] to be type of String"), "{err}");

        let pairs = Value::hash([("a", "b")]);
        assert!(check(Literal::seq(Literal::seq(Type::String)), pairs).is_ok());
    }

    #[test]
    fn records_never_match_sequence_patterns() {
        let point = Value::record("Point", [("x", "a"), ("y", "b")]);
        let err = check(Literal::seq(Type::String), point).unwrap_err();
        assert_eq!(err, r#"expected Point { x: "a", y: "b" } to be type of [String]"#);
        assert!(check(Type::named("Point"), Value::record("Point", [("x", 1)])).is_ok());
    }

    #[test]
    fn mappings_check_keys_then_values() {
        let pattern = Literal::map(Type::Symbol, Type::String);
        assert!(check(pattern.clone(), Value::hash([(Value::sym("foo"), "aaa")])).is_ok());

        let bad_key = Value::hash([(Value::str("foo"), Value::str("aaa"))]);
        let err = check(pattern.clone(), bad_key).unwrap_err();
        assert!(err.ends_with(r#"(expected "foo" to be type of Symbol)"#), "{err}");

        let bad_value = Value::hash([(Value::sym("foo"), Value::str("aaa")), (Value::sym("bar"), Value::from(1))]);
        let err = check(pattern.clone(), bad_value).unwrap_err();
        assert!(err.ends_with("(expected 1 to be type of String)"), "{err}");

        let err = check(pattern, Value::array(["a"])).unwrap_err();
        assert_eq!(err, r#"expected ["a"] to be type of {Symbol => String}"#);
    }

    #[test]
    fn mappings_stop_at_first_bad_entry_key_before_value() {
        let keys = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let values = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let (key_log, value_log) = (keys.clone(), values.clone());
        let key_spy = Satisfies::new("be a symbol", move |k| {
            key_log.lock().unwrap().push(k.clone());
            matches!(k, Value::Symbol(_))
        });
        let value_spy = Satisfies::new("be anything", move |v| {
            value_log.lock().unwrap().push(v.clone());
            true
        });
        let value = Value::hash([
            (Value::sym("a"), Value::str("x")),
            (Value::from(1), Value::str("y")),
            (Value::sym("c"), Value::str("z")),
        ]);
        let err = check(Literal::map(key_spy, value_spy), value).unwrap_err();
        assert!(err.ends_with("(expected 1 to be a symbol)"), "{err}");
        assert_eq!(*keys.lock().unwrap(), vec![Value::sym("a"), Value::from(1)]);
        assert_eq!(*values.lock().unwrap(), vec![Value::str("x")]);
    }

    #[test]
    fn empty_containers_match_any_element_pattern() {
        assert!(check(Literal::seq(Type::String), Value::array(Vec::<Value>::new())).is_ok());
        assert!(check(Literal::map(Type::Symbol, Type::String), Value::hash(Vec::<(Value, Value)>::new())).is_ok());
    }

    #[test]
    fn malformed_arity_fails_before_looking_at_the_value() {
        let err = check(Literal::seq_of([Type::String, Type::Symbol]), "foo").unwrap_err();
        assert_eq!(err, "sequence pattern must have exactly 1 element, but given [String, Symbol]");

        let err = check(
            Literal::map_of([(Type::String, Type::Integer), (Type::Symbol, Type::Integer)]),
            Value::array(["foo"]),
        )
        .unwrap_err();
        assert!(err.contains("exactly 1 entry"), "{err}");
    }

    #[test]
    fn malformed_arity_nested_in_containers() {
        let lit = Literal::map(Type::String, Literal::seq_of([Type::Integer, Type::Symbol]));
        let value = Value::hash([("foo", Value::array([1]))]);
        let err = check(lit, value).unwrap_err();
        assert_eq!(
            err,
            "expected {\"foo\" => [1]} to be type of {String => [Integer, Symbol]}\n  \
             (sequence pattern must have exactly 1 element, but given [Integer, Symbol])"
        );
    }

    #[test]
    fn unrecognized_literals_read_as_type_mismatch() {
        let err = check(Value::from(42), "foo").unwrap_err();
        assert_eq!(err, r#"expected "foo" to be type of 42"#);
    }

    #[test]
    fn predicate_messages_pass_through_verbatim() {
        let err = check(KindOf(Type::Symbol), "foo").unwrap_err();
        assert_eq!(err, r#"expected "foo" to be a kind of Symbol"#);

        let err = check(Literal::seq(KindOf(Type::String)), Value::array([Value::str("a"), Value::from(1)])).unwrap_err();
        assert_eq!(
            err,
            "expected [\"a\", 1] to be type of [be a kind of String]\n  (expected 1 to be a kind of String)"
        );
    }

    #[derive(Debug)]
    struct Mute;

    impl Predicate for Mute {
        fn test(&self, _: &Value) -> Result<(), Diagnostic> {
            Err(Diagnostic::new(""))
        }
        fn description(&self) -> String {
            "stay quiet".into()
        }
    }

    #[test]
    fn blank_predicate_failures_get_a_message() {
        assert_eq!(check(Literal::predicate(Mute), 1).unwrap_err(), "expected 1 to stay quiet");
    }

    #[test]
    fn or_nil_only_touches_the_outer_frame() {
        let ir = lower_to_ir(&Literal::seq(Type::String));
        let err = match_pattern(&ir, &Value::array([Value::Nil]), true).unwrap_err();
        assert_eq!(
            err.render(),
            "expected [nil] to be type of [String] or nil\n  (expected nil to be type of String)"
        );
    }
}
