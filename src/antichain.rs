//! Per-state antichains of macrostates.
//!
//! The downward engine memoizes results of `state ⊑ macrostate` queries.
//! Inclusion is monotone in the macrostate: if `q ⊑ P` then `q ⊑ P'` for
//! every `P' ⊇ P`, and failure propagates the other way. So for each state
//! it suffices to remember:
//!
//! - the *minimal* macrostates known to succeed (an upward-closed family),
//! - the *maximal* macrostates known to fail (a downward-closed family).
//!
//! [`Antichain`] stores such a family for every state and keeps only its
//! extremal elements: no stored macrostate is comparable to another one
//! stored for the same state.

use std::collections::HashMap;

use crate::macrostate::Macrostate;
use crate::types::State;

/// Which extremal elements an [`Antichain`] keeps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Polarity {
    /// Keeps minimal macrostates. A query is covered by any stored subset.
    Minimal,
    /// Keeps maximal macrostates. A query is covered by any stored superset.
    Maximal,
}

#[derive(Debug, Clone)]
pub struct Antichain {
    polarity: Polarity,
    sets: HashMap<State, Vec<Macrostate>>,
}

impl Antichain {
    pub fn new(polarity: Polarity) -> Self {
        Self {
            polarity,
            sets: HashMap::new(),
        }
    }

    /// Antichain of minimal macrostates (positive results).
    pub fn minimal() -> Self {
        Self::new(Polarity::Minimal)
    }

    /// Antichain of maximal macrostates (negative results).
    pub fn maximal() -> Self {
        Self::new(Polarity::Maximal)
    }

    /// Checks whether `stored` makes `query` redundant.
    fn dominates(&self, stored: &Macrostate, query: &Macrostate) -> bool {
        match self.polarity {
            Polarity::Minimal => stored.is_subset_of(query),
            Polarity::Maximal => query.is_subset_of(stored),
        }
    }

    /// Checks whether `(state, macrostate)` follows from a stored element.
    pub fn covers(&self, state: State, macrostate: &Macrostate) -> bool {
        self.sets
            .get(&state)
            .is_some_and(|sets| sets.iter().any(|s| self.dominates(s, macrostate)))
    }

    /// Inserts `(state, macrostate)` unless it is already covered.
    ///
    /// Stored elements dominated by the new one are removed.
    /// Returns true if the antichain changed.
    pub fn insert(&mut self, state: State, macrostate: Macrostate) -> bool {
        if self.covers(state, &macrostate) {
            return false;
        }
        let polarity = self.polarity;
        let sets = self.sets.entry(state).or_default();
        sets.retain(|s| match polarity {
            Polarity::Minimal => !macrostate.is_subset_of(s),
            Polarity::Maximal => !s.is_subset_of(&macrostate),
        });
        sets.push(macrostate);
        true
    }

    /// Inserts every element of `other`.
    pub fn merge(&mut self, other: Antichain) {
        debug_assert_eq!(self.polarity, other.polarity);
        for (state, sets) in other.sets {
            for m in sets {
                self.insert(state, m);
            }
        }
    }

    /// Total number of stored macrostates.
    pub fn len(&self) -> usize {
        self.sets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.values().all(Vec::is_empty)
    }

    /// Checks that no two macrostates stored for one state are comparable.
    pub fn is_antichain(&self) -> bool {
        self.sets.values().all(|sets| {
            sets.iter().enumerate().all(|(i, a)| {
                sets.iter()
                    .enumerate()
                    .all(|(j, b)| i == j || !a.is_subset_of(b))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn q(id: u32) -> State {
        State::new(id)
    }

    #[test]
    fn test_minimal() {
        let mut ac = Antichain::minimal();
        assert!(ac.insert(q(0), [1, 2, 3].into()));
        assert!(ac.covers(q(0), &Macrostate::from([1, 2, 3, 4])));
        assert!(!ac.covers(q(0), &Macrostate::from([1, 2])));
        assert!(!ac.covers(q(1), &Macrostate::from([1, 2, 3])));

        // A superset is redundant.
        assert!(!ac.insert(q(0), [1, 2, 3, 4].into()));
        // A subset replaces the stored element.
        assert!(ac.insert(q(0), [1, 2].into()));
        assert_eq!(ac.len(), 1);
        assert!(ac.covers(q(0), &Macrostate::from([1, 2])));

        // Incomparable elements coexist.
        assert!(ac.insert(q(0), [3].into()));
        assert_eq!(ac.len(), 2);
        assert!(ac.is_antichain());
    }

    #[test]
    fn test_maximal() {
        let mut ac = Antichain::maximal();
        assert!(ac.insert(q(0), [1].into()));
        assert!(ac.covers(q(0), &Macrostate::new()));
        assert!(ac.covers(q(0), &Macrostate::from([1])));
        assert!(!ac.covers(q(0), &Macrostate::from([1, 2])));

        assert!(!ac.insert(q(0), Macrostate::new()));
        assert!(ac.insert(q(0), [1, 2].into()));
        assert!(ac.insert(q(0), [3].into()));
        assert_eq!(ac.len(), 2);
        assert!(ac.is_antichain());
    }

    #[test]
    fn test_merge() {
        let mut base = Antichain::minimal();
        base.insert(q(0), [1, 2].into());

        let mut layer = Antichain::minimal();
        layer.insert(q(0), [1].into());
        layer.insert(q(1), [5].into());

        base.merge(layer);
        assert_eq!(base.len(), 2);
        assert!(base.covers(q(0), &Macrostate::from([1])));
        assert!(base.covers(q(1), &Macrostate::from([5, 6])));
        assert!(base.is_antichain());
    }
}
