//! Error type shared by automaton construction and the checking engines.
//!
//! A failed inclusion is *not* an error: engines report it as `Ok(false)`.
//! Errors describe malformed input, static limitations of an algorithm, or an
//! exhausted step budget.

use std::fmt;

use crate::types::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A symbol is used with two different arities.
    InconsistentArity {
        symbol: Symbol,
        expected: usize,
        found: usize,
    },
    /// The requested computation exceeds what the algorithm can enumerate.
    NotImplemented(String),
    /// The configured step budget ran out before a verdict was reached.
    Inconclusive { steps: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InconsistentArity {
                symbol,
                expected,
                found,
            } => write!(
                f,
                "Inconsistent arity: symbol {} used with arity {} and {}",
                symbol, expected, found
            ),
            Error::NotImplemented(what) => write!(f, "Not implemented: {}", what),
            Error::Inconclusive { steps } => {
                write!(f, "Inconclusive: step budget exhausted after {} steps", steps)
            }
        }
    }
}

impl std::error::Error for Error {}
