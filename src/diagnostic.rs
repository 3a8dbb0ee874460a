//! Failure trail for a single failing validation path.
//!
//! The evaluator returns a `Diagnostic` as the error half of its `Result`.
//! Each container that sees a nested failure wraps it with its own frame, so
//! the chain reads outer to inner along the one path that failed.
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    // innermost first; never empty
    frames: Vec<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self { frames: vec![message.into()] }
    }

    /// Put `outer` in front of the current trail.
    pub fn wrap(mut self, outer: impl Into<String>) -> Self {
        self.frames.push(outer.into());
        self
    }

    /// Frames from the outermost check down to the failing leaf.
    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().rev().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_blank(&self) -> bool {
        self.frames.iter().all(|f| f.trim().is_empty())
    }

    /// Outermost frame first; each deeper frame indented and parenthesized
    /// beneath the one that contains it.
    pub fn render(&self) -> String {
        let mut frames = self.frames.iter();
        let mut out = frames.next().cloned().unwrap_or_default();
        for outer in frames {
            out = format!("{outer}\n  ({out})");
        }
        out
    }
}

impl From<String> for Diagnostic {
    fn from(message: String) -> Self { Diagnostic::new(message) }
}

impl From<&str> for Diagnostic {
    fn from(message: &str) -> Self { Diagnostic::new(message) }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for Diagnostic {}
