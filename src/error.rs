use thiserror::Error;

/// Misuse caught while building a validator. Value mismatches and malformed
/// pattern literals are not errors; they come back as failed validations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `Validator::new` was given no alternatives.
    #[error("a validator needs at least one pattern alternative")]
    NoAlternatives,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
