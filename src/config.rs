//! Algorithm selection and options for inclusion/equivalence checks.
//!
//! ```
//! use tacheck::config::{Algorithm, BisimulationOptions, CheckConfig, Direction};
//!
//! let downward = CheckConfig::default();
//! assert_eq!(downward.algorithm, Algorithm::Antichains { direction: Direction::Downward });
//!
//! let upward = CheckConfig::default()
//!     .with_algorithm(Algorithm::Bisimulation(BisimulationOptions::default().with_lax(true)))
//!     .with_max_steps(Some(10_000));
//! assert_eq!(upward.max_steps, Some(10_000));
//! ```

use std::fmt;

/// Traversal direction of the antichain family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top-down: from final states towards leaves.
    #[default]
    Downward,
    /// Bottom-up: from leaves towards final states.
    Upward,
}

/// Switches of the bisimulation up-to-congruence engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BisimulationOptions {
    /// Memoize successor sets per `(symbol, position, macrostate)` (default: true).
    pub use_cache: bool,
    /// Prune couples implied by the congruence closure of processed couples (default: true).
    /// When off, only exact (equivalence) or subsumed (inclusion) couples are pruned.
    pub use_congruence: bool,
    /// Use the cheaper, incomplete congruence closure test (default: false).
    ///
    /// Inclusion checks without congruence decide the same way in both
    /// modes. There `lax` only stops the closure sweep at the first cover.
    pub lax: bool,
}

impl Default for BisimulationOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            use_congruence: true,
            lax: false,
        }
    }
}

impl BisimulationOptions {
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_congruence(mut self, use_congruence: bool) -> Self {
        self.use_congruence = use_congruence;
        self
    }

    pub fn with_lax(mut self, lax: bool) -> Self {
        self.lax = lax;
        self
    }

    /// All eight switch combinations.
    pub fn all() -> impl Iterator<Item = BisimulationOptions> {
        (0..8u8).map(|bits| BisimulationOptions {
            use_cache: bits & 1 != 0,
            use_congruence: bits & 2 != 0,
            lax: bits & 4 != 0,
        })
    }
}

/// The algorithm used by a check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Antichains { direction: Direction },
    Bisimulation(BisimulationOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Antichains {
            direction: Direction::Downward,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Antichains { direction } => write!(f, "antichains ({:?})", direction),
            Algorithm::Bisimulation(opts) => write!(
                f,
                "bisimulation (cache={}, congruence={}, lax={})",
                opts.use_cache, opts.use_congruence, opts.lax
            ),
        }
    }
}

/// Configuration of one inclusion or equivalence check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckConfig {
    /// Algorithm to run (default: downward antichains).
    pub algorithm: Algorithm,
    /// In equivalence mode, also require both sides of a couple to be
    /// simultaneously empty or non-empty (default: false).
    pub strict_emptiness: bool,
    /// Maximum number of expansions before giving up with
    /// [`Error::Inconclusive`](crate::error::Error::Inconclusive) (default: unbounded).
    pub max_steps: Option<usize>,
}

impl CheckConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_strict_emptiness(mut self, strict_emptiness: bool) -> Self {
        self.strict_emptiness = strict_emptiness;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }
}
