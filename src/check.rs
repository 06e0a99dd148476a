//! Entry points dispatching on a [`CheckConfig`].

use log::debug;

use crate::automaton::TreeAutomaton;
use crate::bisimulation::Bisimulation;
use crate::config::{Algorithm, BisimulationOptions, CheckConfig, Direction};
use crate::downward::DownwardInclusion;
use crate::error::Result;

/// Options of the upward antichain check: plain subsumption of couples.
const UPWARD_ANTICHAINS: BisimulationOptions = BisimulationOptions {
    use_cache: true,
    use_congruence: false,
    lax: false,
};

/// Decides `L(smaller) ⊆ L(bigger)`.
///
/// # Example
///
/// ```
/// use tacheck::automaton::TreeAutomaton;
/// use tacheck::check::check_inclusion;
/// use tacheck::config::CheckConfig;
///
/// // f(a, a) versus f(a|b, a|b).
/// let faa = TreeAutomaton::builder().leaf(0, 0).transition(2, [0, 0], 1).final_state(1).build()?;
/// let fxy = TreeAutomaton::builder().leaf(0, 0).leaf(1, 0).transition(2, [0, 0], 1).final_state(1).build()?;
///
/// assert!(check_inclusion(&faa, &fxy, &CheckConfig::default())?);
/// assert!(!check_inclusion(&fxy, &faa, &CheckConfig::default())?);
/// # Ok::<(), tacheck::error::Error>(())
/// ```
pub fn check_inclusion(smaller: &TreeAutomaton, bigger: &TreeAutomaton, config: &CheckConfig) -> Result<bool> {
    debug!("check_inclusion with {}", config.algorithm);
    match config.algorithm {
        Algorithm::Antichains {
            direction: Direction::Downward,
        } => DownwardInclusion::new(smaller, bigger)
            .with_max_steps(config.max_steps)
            .check(),
        Algorithm::Antichains {
            direction: Direction::Upward,
        } => Bisimulation::inclusion(smaller, bigger, UPWARD_ANTICHAINS)
            .with_max_steps(config.max_steps)
            .check(),
        Algorithm::Bisimulation(options) => Bisimulation::inclusion(smaller, bigger, options)
            .with_max_steps(config.max_steps)
            .check(),
    }
}

/// Decides `L(smaller) = L(bigger)`.
///
/// The antichain algorithms check inclusion in both directions. The
/// bisimulation algorithm runs once in equivalence mode; with
/// `strict_emptiness` it first removes unreachable and useless states so that
/// the stricter final-state check stays exact.
pub fn check_equivalence(smaller: &TreeAutomaton, bigger: &TreeAutomaton, config: &CheckConfig) -> Result<bool> {
    debug!("check_equivalence with {}", config.algorithm);
    match config.algorithm {
        Algorithm::Antichains { .. } => {
            Ok(check_inclusion(smaller, bigger, config)? && check_inclusion(bigger, smaller, config)?)
        }
        Algorithm::Bisimulation(options) if config.strict_emptiness => {
            let (smaller, bigger) = (smaller.trim(), bigger.trim());
            Bisimulation::equivalence(&smaller, &bigger, options)
                .with_strict_emptiness(true)
                .with_max_steps(config.max_steps)
                .check()
        }
        Algorithm::Bisimulation(options) => Bisimulation::equivalence(smaller, bigger, options)
            .with_max_steps(config.max_steps)
            .check(),
    }
}
