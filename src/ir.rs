// Classified pattern IR. Built once from a `Literal`; never re-inspected.
use std::fmt;
use std::sync::Arc;

use crate::predicate::Predicate;
use crate::types::Type;

#[derive(Clone, Debug)]
pub enum Pattern {
    TypeRef(Type),           // runtime type is T or below
    Boolean,                 // exactly true / false
    Sequence(Box<Pattern>),  // every element matches
    Mapping(Box<Pattern>, Box<Pattern>), // every key and value match
    Predicate(Arc<dyn Predicate>),
    Malformed(Malformed),    // always fails
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Malformed {
    /// Sequence literal without exactly one element description.
    SequenceArity { literal: String },
    /// Map literal without exactly one entry.
    MappingArity { literal: String },
    /// Literal of no recognized shape.
    Unrecognized { literal: String },
}

impl Malformed {
    /// The literal as written.
    pub fn literal(&self) -> &str {
        match self {
            Malformed::SequenceArity { literal }
            | Malformed::MappingArity { literal }
            | Malformed::Unrecognized { literal } => literal,
        }
    }
}

impl Pattern {
    pub fn is_malformed(&self) -> bool {
        match self {
            Pattern::Malformed(_) => true,
            Pattern::Sequence(element) => element.is_malformed(),
            Pattern::Mapping(key, value) => key.is_malformed() || value.is_malformed(),
            Pattern::Predicate(p) => p.is_malformed(),
            Pattern::TypeRef(_) | Pattern::Boolean => false,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::TypeRef(ty) => write!(f, "{ty}"),
            Pattern::Boolean => write!(f, ":{}", crate::literal::BOOLEAN),
            Pattern::Sequence(element) => write!(f, "[{element}]"),
            Pattern::Mapping(key, value) => write!(f, "{{{key} => {value}}}"),
            Pattern::Predicate(p) => f.write_str(&p.description()),
            Pattern::Malformed(m) => f.write_str(m.literal()),
        }
    }
}
