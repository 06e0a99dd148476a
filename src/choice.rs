//! Mixed-radix enumeration of functions `{0..len} → {0..range}`.
//!
//! Both engines enumerate such functions. The downward engine assigns each
//! covering tuple to one child position (a *choice function*); the upward
//! engine assigns a processed couple to each of the other child positions of
//! a symbol (a *post variant*). There are `range^len` of them, which is
//! computed exactly with [`BigUint`] before enumerating.

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Exact number of functions `{0..len} → {0..range}`.
pub fn count(len: usize, range: usize) -> BigUint {
    BigUint::from(range).pow(len as u32)
}

/// Number of functions as a `usize`, or [`Error::NotImplemented`] when it is not addressable.
pub fn checked_count(len: usize, range: usize) -> Result<usize> {
    let total = count(len, range);
    usize::try_from(&total)
        .map_err(|_| Error::NotImplemented(format!("enumerating {} functions from {} to {} values", total, len, range)))
}

/// A counter that walks every function `{0..len} → {0..range}`.
///
/// The first call to [`advance`](Self::advance) yields the all-zero function.
/// With `len == 0` exactly one (empty) function is produced; with
/// `range == 0` and `len > 0` none is.
#[derive(Debug, Clone)]
pub struct ChoiceFunctions {
    digits: Vec<usize>,
    range: usize,
    started: bool,
    exhausted: bool,
}

impl ChoiceFunctions {
    pub fn new(len: usize, range: usize) -> Self {
        Self {
            digits: vec![0; len],
            range,
            started: false,
            exhausted: range == 0 && len > 0,
        }
    }

    /// Moves to the next function and returns it, or `None` when all were visited.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.digits);
        }
        for digit in self.digits.iter_mut() {
            *digit += 1;
            if *digit < self.range {
                return Some(&self.digits);
            }
            *digit = 0;
        }
        self.exhausted = true;
        None
    }
}

/// Materializes every function `{0..len} → {0..range}`.
///
/// Fails with [`Error::NotImplemented`] if their number is not addressable.
pub fn all_functions(len: usize, range: usize) -> Result<Vec<Vec<usize>>> {
    let total = checked_count(len, range)?;
    let mut result = Vec::with_capacity(total);
    let mut functions = ChoiceFunctions::new(len, range);
    while let Some(f) = functions.advance() {
        result.push(f.to_vec());
    }
    Ok(result)
}
