//! Type-safe identifiers for tree automata.
//!
//! States, symbols and transitions are all plain integers underneath.
//! The newtypes below keep them apart at compile time, so a symbol can never
//! be used where a state is expected.
use std::fmt;

/// A state identifier, unique within one automaton.
///
/// States of two different automata live in separate namespaces: the same
/// number in the smaller and in the bigger automaton denotes unrelated states.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct State(u32);

impl State {
    /// Creates a new state with the given ID.
    pub const fn new(id: u32) -> Self {
        State(id)
    }

    /// Returns the raw state ID.
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for State {
    fn from(id: u32) -> Self {
        State(id)
    }
}

impl From<State> for u32 {
    fn from(state: State) -> Self {
        state.0
    }
}

/// A transition label.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Creates a new symbol with the given ID.
    pub const fn new(id: u32) -> Self {
        Symbol(id)
    }

    /// Returns the raw symbol ID.
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl From<u32> for Symbol {
    fn from(id: u32) -> Self {
        Symbol(id)
    }
}

/// A symbol together with its arity (number of children).
///
/// # Invariants
///
/// - Within one automaton, a symbol has exactly one arity.
/// - Arity 0 denotes a leaf (constant) symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RankedSymbol {
    pub symbol: Symbol,
    pub arity: usize,
}

impl RankedSymbol {
    pub const fn new(symbol: Symbol, arity: usize) -> Self {
        Self { symbol, arity }
    }

    /// Checks if this is a leaf symbol.
    pub const fn is_leaf(self) -> bool {
        self.arity == 0
    }
}

impl fmt::Display for RankedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.symbol, self.arity)
    }
}

/// Index of a transition inside its automaton.
///
/// IDs are dense (0-indexed) and follow the canonical order of transitions,
/// so sorted ID lists can be intersected by a linear merge.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TransitionId(u32);

impl TransitionId {
    pub(crate) fn new(index: usize) -> Self {
        TransitionId(index as u32)
    }

    /// Returns the position of the transition in the automaton's table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
