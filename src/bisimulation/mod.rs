//! Upward (bottom-up) bisimulation up to congruence.
//!
//! The engine explores couples `(X, Y)` where `X` is the set of states of the
//! smaller automaton and `Y` the set of states of the bigger automaton
//! reached by the same tree. Exploration starts from the leaves and proceeds
//! through post images until a fixpoint. A couple whose final-state
//! acceptance disagrees is a counterexample.
//!
//! Couples that already follow from the explored ones are pruned. The
//! implication test depends on the [`Mode`] and on the options:
//!
//! | mode        | congruence on              | congruence off |
//! |-------------|----------------------------|----------------|
//! | equivalence | congruence closure         | exact match    |
//! | inclusion   | union on the smaller side  | subsumption    |
//!
//! See [`closure`] for the definitions.

pub mod closure;
pub mod post;

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use log::{debug, trace};

use crate::alphabet::RankedAlphabet;
use crate::automaton::TreeAutomatonView;
use crate::config::BisimulationOptions;
use crate::error::{Error, Result};
use crate::macrostate::Couple;
use crate::types::RankedSymbol;

use self::closure::{in_congruence_closure, in_inclusion_closure, is_subsumed};
use self::post::PostImage;

/// What the engine decides.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// `L(smaller) = L(bigger)`.
    Equivalence,
    /// `L(smaller) ⊆ L(bigger)`.
    Inclusion,
}

/// Counters collected by [`Bisimulation`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Couples seeded from leaf symbols.
    pub seeded: usize,
    /// Couples whose post image was computed.
    pub processed: usize,
    /// Couples popped from the worklist but already implied.
    pub skipped: usize,
    /// Candidate couples produced by post images.
    pub candidates: usize,
    /// Successor cache hits and misses.
    pub cache_hits: usize,
    pub cache_misses: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seeded={}, processed={}, skipped={}, candidates={}, cache={}/{}",
            self.seeded,
            self.processed,
            self.skipped,
            self.candidates,
            self.cache_hits,
            self.cache_hits + self.cache_misses
        )
    }
}

/// Upward checker for one pair of automata.
pub struct Bisimulation<'a, A, B> {
    smaller: &'a A,
    bigger: &'a B,
    mode: Mode,
    options: BisimulationOptions,
    strict_emptiness: bool,
    max_steps: Option<usize>,
    post: PostImage<'a, A, B>,
    /// Couples awaiting expansion, ordered by total size, then set order.
    todo: BTreeSet<(usize, Couple)>,
    /// Expanded couples.
    done: Vec<Couple>,
    /// Every couple ever discovered.
    known: Vec<Couple>,
    known_set: HashSet<Couple>,
    stats: Stats,
}

impl<'a, A, B> Bisimulation<'a, A, B>
where
    A: TreeAutomatonView,
    B: TreeAutomatonView,
{
    pub fn new(smaller: &'a A, bigger: &'a B, mode: Mode, options: BisimulationOptions) -> Self {
        Self {
            smaller,
            bigger,
            mode,
            options,
            strict_emptiness: false,
            max_steps: None,
            post: PostImage::new(smaller, bigger, options.use_cache),
            todo: BTreeSet::new(),
            done: Vec::new(),
            known: Vec::new(),
            known_set: HashSet::new(),
            stats: Stats::default(),
        }
    }

    /// Checks `L(smaller) = L(bigger)`.
    pub fn equivalence(smaller: &'a A, bigger: &'a B, options: BisimulationOptions) -> Self {
        Self::new(smaller, bigger, Mode::Equivalence, options)
    }

    /// Checks `L(smaller) ⊆ L(bigger)`.
    pub fn inclusion(smaller: &'a A, bigger: &'a B, options: BisimulationOptions) -> Self {
        Self::new(smaller, bigger, Mode::Inclusion, options)
    }

    /// In equivalence mode, also require both sides of every couple to be
    /// simultaneously empty or non-empty.
    ///
    /// This is exact only for automata without unreachable or useless states.
    pub fn with_strict_emptiness(mut self, strict_emptiness: bool) -> Self {
        self.strict_emptiness = strict_emptiness;
        self
    }

    /// Limits the number of processed couples; exceeding it yields [`Error::Inconclusive`].
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Couples that were expanded.
    pub fn done(&self) -> &[Couple] {
        &self.done
    }

    /// Every couple discovered so far.
    pub fn known(&self) -> &[Couple] {
        &self.known
    }

    /// Runs the fixpoint. Returns false as soon as a counterexample couple is found.
    pub fn check(&mut self) -> Result<bool> {
        self.todo.clear();
        self.done.clear();
        self.known.clear();
        self.known_set.clear();
        self.stats = Stats::default();

        let mut alphabet = RankedAlphabet::joint(self.smaller, self.bigger)?;
        debug!(
            "{:?} check, {:?}, alphabet {}",
            self.mode, self.options, alphabet
        );

        let leaves: Vec<_> = alphabet.leaves().collect();
        for symbol in leaves {
            let couple = Couple::new(self.smaller.leaf_states(symbol), self.bigger.leaf_states(symbol));
            trace!("seed {} from leaf {}", couple, symbol);
            self.stats.seeded += 1;
            self.discover(couple);
        }
        for couple in &self.known {
            if !self.is_consistent(couple) {
                debug!("leaf couple {} is inconsistent", couple);
                return Ok(false);
            }
        }

        alphabet.prune_leaves();
        let symbols: Vec<RankedSymbol> = alphabet.iter().collect();

        let result = self.run(&symbols);
        self.stats.cache_hits = self.post.cache_hits();
        self.stats.cache_misses = self.post.cache_misses();
        if let Ok(verdict) = result {
            debug!("{:?} check: result={}, {}", self.mode, verdict, self.stats);
        }
        result
    }

    fn run(&mut self, symbols: &[RankedSymbol]) -> Result<bool> {
        while let Some((_, actual)) = self.todo.pop_first() {
            if self.is_implied(&self.done, &actual, false) {
                trace!("skip {}", actual);
                self.stats.skipped += 1;
                continue;
            }

            self.stats.processed += 1;
            if let Some(max) = self.max_steps {
                if self.stats.processed > max {
                    return Err(Error::Inconclusive { steps: max });
                }
            }
            trace!("process {}", actual);
            self.done.push(actual.clone());

            for &symbol in symbols {
                let candidates = self.post.post(&actual, &self.done, symbol)?;
                for next in candidates {
                    self.stats.candidates += 1;
                    if !self.is_consistent(&next) {
                        debug!("{} reaches inconsistent couple {} via {}", actual, next, symbol);
                        return Ok(false);
                    }
                    if !self.is_implied(&self.known, &next, true) {
                        trace!("discover {} via {}", next, symbol);
                        self.discover(next);
                    }
                }
            }
        }
        Ok(true)
    }

    /// Adds a couple to the worklist, unless it was already discovered.
    fn discover(&mut self, couple: Couple) {
        if self.known_set.insert(couple.clone()) {
            self.known.push(couple.clone());
            self.todo.insert((couple.total_len(), couple));
        }
    }

    /// Final-state check of a couple.
    pub fn is_consistent(&self, couple: &Couple) -> bool {
        let accepts_smaller = self.smaller.is_accepting(&couple.smaller);
        let accepts_bigger = self.bigger.is_accepting(&couple.bigger);
        match self.mode {
            Mode::Equivalence => {
                accepts_smaller == accepts_bigger
                    && (!self.strict_emptiness || couple.smaller.is_empty() == couple.bigger.is_empty())
            }
            Mode::Inclusion => !accepts_smaller || accepts_bigger,
        }
    }

    /// Checks whether `couple` follows from `against`.
    ///
    /// `against_known` selects the hash set for exact lookups.
    fn is_implied(&self, against: &[Couple], couple: &Couple, against_known: bool) -> bool {
        let lax = self.options.lax;
        match (self.mode, self.options.use_congruence) {
            (Mode::Equivalence, true) => in_congruence_closure(against, couple, lax),
            (Mode::Equivalence, false) => {
                if against_known {
                    self.known_set.contains(couple)
                } else {
                    against.contains(couple)
                }
            }
            (Mode::Inclusion, true) => in_inclusion_closure(against, couple, lax),
            (Mode::Inclusion, false) => is_subsumed(against, couple),
        }
    }
}
