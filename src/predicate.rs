//! Opaque pattern leaves.
//!
//! Anything implementing [`Predicate`] can sit inside a pattern. The evaluator
//! never looks past the trait: on failure the predicate's own diagnostic is
//! reported as-is. [`crate::Validator`] implements it too, which is how
//! validators nest inside each other.
use std::fmt;

use crate::diagnostic::Diagnostic;
use crate::types::Type;
use crate::value::Value;

pub trait Predicate: fmt::Debug + Send + Sync {
    /// `Err` carries the failure description for this value.
    fn test(&self, value: &Value) -> Result<(), Diagnostic>;

    /// How the leaf reads when a pattern containing it is printed.
    fn description(&self) -> String;

    /// Whether the leaf wraps a pattern that can never match.
    fn is_malformed(&self) -> bool {
        false
    }
}

/// Plain "kind of" check: no containers, no nullable handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindOf(pub Type);

impl Predicate for KindOf {
    fn test(&self, value: &Value) -> Result<(), Diagnostic> {
        if self.0.includes(value) {
            return Ok(());
        }
        Err(Diagnostic::new(format!("expected {value} to be a kind of {}", self.0)))
    }

    fn description(&self) -> String {
        format!("be a kind of {}", self.0)
    }
}

/// Closure-backed predicate.
pub struct Satisfies {
    description: String,
    check: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Satisfies {
    pub fn new<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self { description: description.into(), check: Box::new(check) }
    }
}

impl fmt::Debug for Satisfies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satisfies")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Predicate for Satisfies {
    fn test(&self, value: &Value) -> Result<(), Diagnostic> {
        if (self.check)(value) {
            return Ok(());
        }
        Err(Diagnostic::new(format!("expected {value} to {}", self.description)))
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
