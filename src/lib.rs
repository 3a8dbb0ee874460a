//! Structural type patterns for in-memory values.
//!
//! Build a [`Validator`] from one or more pattern literals (types, `:boolean`,
//! one-element sequence literals, one-entry map literals, predicates), then
//! check values against it. A failed check explains itself with a trail from
//! the outermost mismatch down to the leaf that caused it:
//!
//! ```
//! use type_pattern::{Literal, Type, Validator, Value};
//!
//! let v = Validator::new([Literal::map(Type::Symbol, Literal::seq(Type::String))]).unwrap();
//! let value = Value::hash([(Value::sym("aaa"), Value::array([Value::str("bbb"), Value::from(1)]))]);
//!
//! let res = v.validate(&value);
//! assert!(!res.passed);
//! assert!(res.message.unwrap().ends_with("(expected 1 to be type of String))"));
//! ```
pub mod diagnostic;
pub mod error;
pub mod eval;
pub mod ir;
pub mod literal;
pub mod lower;
pub mod predicate;
pub mod types;
pub mod validator;
pub mod value;

pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use ir::{Malformed, Pattern};
pub use literal::Literal;
pub use predicate::{KindOf, Predicate, Satisfies};
pub use types::Type;
pub use validator::{describe, make_validator, validate, with_nullable, Validation, Validator};
pub use value::{Record, Value};
