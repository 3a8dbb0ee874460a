//! Public entry point: one or more top-level alternatives plus a nullable flag.
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::eval;
use crate::ir::Pattern;
use crate::literal::Literal;
use crate::lower::lower_to_ir;
use crate::predicate::Predicate;
use crate::value::Value;

#[derive(Clone, Debug)]
pub struct Validator {
    alternatives: Vec<Pattern>, // never empty
    nullable: bool,
}

/// Outcome of one `validate` call. `message` is set exactly when `passed` is
/// false.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub passed: bool,
    pub message: Option<String>,
}

impl Validator {
    /// Literals are classified here, once. Malformed literals still build a
    /// validator; they fail every value they are checked against.
    pub fn new<I>(alternatives: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let alternatives: Vec<Pattern> = alternatives
            .into_iter()
            .map(|lit| lower_to_ir(&lit.into()))
            .collect();
        if alternatives.is_empty() {
            return Err(Error::NoAlternatives);
        }
        Ok(Self { alternatives, nullable: false })
    }

    /// Also accept `nil`. Calling it again changes nothing.
    pub fn or_nil(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn alternatives(&self) -> &[Pattern] {
        &self.alternatives
    }

    pub fn validate(&self, value: &Value) -> Validation {
        match self.check(value) {
            Ok(()) => Validation { passed: true, message: None },
            Err(diagnostic) => Validation { passed: false, message: Some(diagnostic.render()) },
        }
    }

    /// Same as [`Validator::validate`], keeping the diagnostic structured.
    pub fn check(&self, value: &Value) -> Result<(), Diagnostic> {
        if self.nullable && value.is_nil() {
            return Ok(());
        }

        let single = self.alternatives.len() == 1;
        let mut last_failure = None;
        for pattern in &self.alternatives {
            match eval::match_pattern(pattern, value, self.nullable && single) {
                Ok(()) => return Ok(()),
                Err(diagnostic) => last_failure = Some(diagnostic),
            }
        }

        let diagnostic = match last_failure {
            Some(diagnostic) if single => diagnostic,
            // union failures list the alternatives only, not each one's reason
            _ => Diagnostic::new(eval::type_of_message(value, &self.expected(), self.nullable)),
        };
        debug!(
            %value,
            alternatives = self.alternatives.len(),
            depth = diagnostic.depth(),
            "validation failed"
        );
        Err(diagnostic)
    }

    /// `be type of String or Symbol or nil`
    pub fn describe(&self) -> String {
        let suffix = if self.nullable { " or nil" } else { "" };
        format!("be type of {}{suffix}", self.expected())
    }

    fn expected(&self) -> String {
        self.alternatives
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl Predicate for Validator {
    fn test(&self, value: &Value) -> Result<(), Diagnostic> {
        self.check(value)
    }

    fn description(&self) -> String {
        self.describe()
    }

    fn is_malformed(&self) -> bool {
        self.alternatives.iter().any(Pattern::is_malformed)
    }
}

impl From<Validator> for Literal {
    fn from(v: Validator) -> Self {
        Literal::Predicate(Arc::new(v))
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ------------------------------- Front API -------------------------------- //

pub fn make_validator<I>(alternatives: I) -> Result<Validator>
where
    I: IntoIterator,
    I::Item: Into<Literal>,
{
    Validator::new(alternatives)
}

pub fn with_nullable(validator: Validator) -> Validator {
    validator.or_nil()
}

pub fn validate(validator: &Validator, value: &Value) -> Validation {
    validator.validate(value)
}

pub fn describe(validator: &Validator) -> String {
    validator.describe()
}

// ------------------------------- Tests ------------------------------------ //
