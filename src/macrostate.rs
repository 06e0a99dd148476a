//! Macrostates: canonically ordered sets of states.
//!
//! A [`Macrostate`] is the unit both engines reason about: the downward engine
//! asks whether a single state is included in a macrostate of the other
//! automaton, while the upward engine pairs two macrostates into a [`Couple`].
//!
//! The representation is a sorted, duplicate-free vector. Equality, hashing
//! and ordering are therefore structural, and the derived [`Ord`] is the
//! lexicographic set order.

use std::fmt;

use crate::types::State;
use crate::utils::{intersect_sorted, intersects_sorted, is_subset_sorted, normalize, union_sorted};

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Macrostate {
    states: Vec<State>,
}

impl Macrostate {
    /// Creates an empty macrostate.
    pub const fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Creates a macrostate holding a single state.
    pub fn singleton(state: State) -> Self {
        Self { states: vec![state] }
    }

    /// Wraps a vector that is already sorted and duplicate-free.
    pub(crate) fn from_sorted(states: Vec<State>) -> Self {
        debug_assert!(states.windows(2).all(|w| w[0] < w[1]));
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: State) -> bool {
        self.states.binary_search(&state).is_ok()
    }

    /// Inserts a state. Returns true if it was not present.
    pub fn insert(&mut self, state: State) -> bool {
        match self.states.binary_search(&state) {
            Ok(_) => false,
            Err(pos) => {
                self.states.insert(pos, state);
                true
            }
        }
    }

    /// Checks whether `self ⊆ other`.
    pub fn is_subset_of(&self, other: &Macrostate) -> bool {
        is_subset_sorted(&self.states, &other.states)
    }

    pub fn intersects(&self, other: &Macrostate) -> bool {
        intersects_sorted(&self.states, &other.states)
    }

    pub fn intersection(&self, other: &Macrostate) -> Macrostate {
        Self::from_sorted(intersect_sorted(&self.states, &other.states))
    }

    /// Adds all states of `other`. Returns true if `self` grew.
    pub fn extend_with(&mut self, other: &Macrostate) -> bool {
        if other.is_subset_of(self) {
            return false;
        }
        self.states = union_sorted(&self.states, &other.states);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.states.iter().copied()
    }
}

impl FromIterator<State> for Macrostate {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut states: Vec<State> = iter.into_iter().collect();
        normalize(&mut states);
        Self { states }
    }
}

impl<const N: usize> From<[u32; N]> for Macrostate {
    fn from(ids: [u32; N]) -> Self {
        ids.into_iter().map(State::new).collect()
    }
}

impl<'a> IntoIterator for &'a Macrostate {
    type Item = State;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, State>>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter().copied()
    }
}

impl fmt::Display for Macrostate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, s) in self.states.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, "}}")
    }
}

/// A pair of macrostates: one over the smaller automaton, one over the bigger.
///
/// Besides being the unit of work of the upward engine, a couple also
/// represents a mixed set of states over the disjoint union of both
/// automata (see [`crate::bisimulation`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Couple {
    pub smaller: Macrostate,
    pub bigger: Macrostate,
}

impl Couple {
    pub fn new(smaller: Macrostate, bigger: Macrostate) -> Self {
        Self { smaller, bigger }
    }

    /// Total number of states on both sides.
    pub fn total_len(&self) -> usize {
        self.smaller.len() + self.bigger.len()
    }

    /// Component-wise `self ⊆ other`.
    pub fn is_subset_of(&self, other: &Couple) -> bool {
        self.smaller.is_subset_of(&other.smaller) && self.bigger.is_subset_of(&other.bigger)
    }

    /// Component-wise union. Returns true if `self` grew.
    pub fn extend_with(&mut self, other: &Couple) -> bool {
        let a = self.smaller.extend_with(&other.smaller);
        let b = self.bigger.extend_with(&other.bigger);
        a || b
    }
}

impl fmt::Display for Couple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.smaller, self.bigger)
    }
}
