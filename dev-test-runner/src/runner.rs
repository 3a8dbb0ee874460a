use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use tracing::debug;
use type_pattern::{Pattern, Validation};

use crate::fixture::{Case, Expect};

#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub file: String,
    pub name: String,
    pub expect: Expect,
    pub validation: Option<Validation>,
    /// Some alternative contains a literal that can never match.
    pub malformed_pattern: bool,
    /// Empty when the case behaved as declared.
    pub problems: Vec<String>,
}

impl Outcome {
    pub fn ok(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn run_cases(file: &str, cases: &[Case]) -> Vec<Outcome> {
    cases.par_iter().map(|case| run_case(file, case)).collect()
}

pub fn run_case(file: &str, case: &Case) -> Outcome {
    let mut outcome = Outcome {
        file: file.to_string(),
        name: case.name.clone(),
        expect: case.expect,
        validation: None,
        malformed_pattern: false,
        problems: Vec::new(),
    };

    let prepared = case.validator().and_then(|v| Ok((v, case.value()?)));
    let (validator, value) = match prepared {
        Ok(x) => x,
        Err(error) => {
            outcome.problems.push(format!("could not build case: {error:#}"));
            return outcome;
        }
    };

    outcome.malformed_pattern = validator.alternatives().iter().any(Pattern::is_malformed);
    debug!(
        case = %case.name,
        validator = %validator,
        %value,
        malformed = outcome.malformed_pattern,
        "running"
    );
    let first = validator.validate(&value);
    let second = validator.validate(&value);
    if first != second {
        outcome.problems.push("repeated validation produced a different outcome".into());
    }

    match (case.expect, first.passed) {
        (Expect::Pass, false) => outcome.problems.push("expected pass, got fail".into()),
        (Expect::Fail, true) => outcome.problems.push("expected fail, got pass".into()),
        _ => {}
    }

    let message = first.message.as_deref().unwrap_or_default();
    if !first.passed && message.trim().is_empty() {
        outcome.problems.push("failure without a message".into());
    }
    for needle in &case.message_contains {
        if !message.contains(needle.as_str()) {
            outcome.problems.push(format!("message does not contain {needle:?}"));
        }
    }
    if let Some(pattern) = &case.message_matches {
        match Regex::new(pattern) {
            Ok(rx) if rx.is_match(message) => {}
            Ok(_) => outcome.problems.push(format!("message does not match /{pattern}/")),
            Err(error) => outcome.problems.push(format!("bad message_matches regex: {error}")),
        }
    }

    outcome.validation = Some(first);
    outcome
}
