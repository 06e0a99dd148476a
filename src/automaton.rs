//! Explicit tree automata and the read-only view the engines consume.
//!
//! The checking engines never mutate an automaton. They only need to ask:
//!
//! - which states are final,
//! - which transitions exist (for-each),
//! - which transitions lead to a given parent state (downward direction),
//! - which transitions carry a given symbol and have a given child at a given
//!   position (upward direction).
//!
//! These queries form the [`TreeAutomatonView`] trait. [`TreeAutomaton`] is an
//! immutable explicit implementation, built once through
//! [`TreeAutomatonBuilder`] which validates the ranked alphabet.
//!
//! # Example
//!
//! ```
//! use tacheck::automaton::{TreeAutomaton, TreeAutomatonView};
//!
//! // Accepts exactly f(a, a).
//! let aut = TreeAutomaton::builder()
//!     .leaf(0, 0)
//!     .transition(1, [0, 0], 1)
//!     .final_state(1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(aut.transitions().len(), 2);
//! assert!(aut.is_final(1.into()));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::macrostate::Macrostate;
use crate::types::{RankedSymbol, State, Symbol, TransitionId};

/// A transition `symbol(children) -> parent`.
///
/// The derived order (parent, symbol, children) is the canonical order of
/// transitions inside an automaton.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub parent: State,
    pub symbol: Symbol,
    pub children: Vec<State>,
}

impl Transition {
    pub fn new(children: Vec<State>, symbol: Symbol, parent: State) -> Self {
        Self {
            parent,
            symbol,
            children,
        }
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }

    pub fn ranked_symbol(&self) -> RankedSymbol {
        RankedSymbol::new(self.symbol, self.arity())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)?;
        if !self.children.is_empty() {
            write!(f, "(")?;
            for (i, c) in self.children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", c)?;
            }
            write!(f, ")")?;
        }
        write!(f, " -> {}", self.parent)
    }
}

/// Read-only queries over a tree automaton.
pub trait TreeAutomatonView {
    /// The set of final (accepting) states.
    fn final_states(&self) -> &Macrostate;

    /// All transitions, indexed by [`TransitionId`].
    fn transitions(&self) -> &[Transition];

    /// Transitions whose parent is `parent`, sorted by ID.
    fn transitions_with_parent(&self, parent: State) -> &[TransitionId];

    /// Transitions labelled `symbol` whose child at `position` is `child`, sorted by ID.
    fn transitions_with_symbol_and_child_at(&self, symbol: Symbol, position: usize, child: State) -> &[TransitionId];

    fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions()[id.index()]
    }

    fn is_final(&self, state: State) -> bool {
        self.final_states().contains(state)
    }

    /// Checks whether the macrostate contains a final state.
    fn is_accepting(&self, macrostate: &Macrostate) -> bool {
        macrostate.intersects(self.final_states())
    }

    /// States reachable by the leaf `symbol`.
    fn leaf_states(&self, symbol: Symbol) -> Macrostate {
        self.transitions()
            .iter()
            .filter(|t| t.symbol == symbol && t.children.is_empty())
            .map(|t| t.parent)
            .collect()
    }
}

/// An immutable explicit tree automaton.
#[derive(Debug, Clone)]
pub struct TreeAutomaton {
    transitions: Vec<Transition>,
    final_states: Macrostate,
    states: Macrostate,
    arities: BTreeMap<Symbol, usize>,
    by_parent: HashMap<State, Vec<TransitionId>>,
    by_child: HashMap<(Symbol, usize, State), Vec<TransitionId>>,
    leaves: HashMap<Symbol, Macrostate>,
}

impl TreeAutomaton {
    pub fn builder() -> TreeAutomatonBuilder {
        TreeAutomatonBuilder::new()
    }

    /// Indexes an already validated, canonically sorted transition list.
    fn index(transitions: Vec<Transition>, final_states: Macrostate) -> Self {
        let mut arities = BTreeMap::new();
        let mut by_parent: HashMap<State, Vec<TransitionId>> = HashMap::new();
        let mut by_child: HashMap<(Symbol, usize, State), Vec<TransitionId>> = HashMap::new();
        let mut leaves: HashMap<Symbol, Macrostate> = HashMap::new();
        let mut states: Vec<State> = final_states.iter().collect();

        for (i, t) in transitions.iter().enumerate() {
            let id = TransitionId::new(i);
            arities.insert(t.symbol, t.arity());
            by_parent.entry(t.parent).or_default().push(id);
            for (pos, &child) in t.children.iter().enumerate() {
                by_child.entry((t.symbol, pos, child)).or_default().push(id);
            }
            if t.children.is_empty() {
                leaves.entry(t.symbol).or_default().insert(t.parent);
            }
            states.push(t.parent);
            states.extend(t.children.iter().copied());
        }

        Self {
            transitions,
            final_states,
            states: states.into_iter().collect(),
            arities,
            by_parent,
            by_child,
            leaves,
        }
    }

    /// All states mentioned by a transition or marked final.
    pub fn states(&self) -> &Macrostate {
        &self.states
    }

    /// The ranked symbols used by the automaton, in symbol order.
    pub fn ranked_symbols(&self) -> impl Iterator<Item = RankedSymbol> + '_ {
        self.arities.iter().map(|(&symbol, &arity)| RankedSymbol::new(symbol, arity))
    }

    /// Returns a copy with every state renamed through `f`.
    ///
    /// `f` should be injective; otherwise distinct states are merged.
    pub fn relabel(&self, mut f: impl FnMut(State) -> State) -> TreeAutomaton {
        let mut transitions: Vec<Transition> = self
            .transitions
            .iter()
            .map(|t| Transition::new(t.children.iter().map(|&c| f(c)).collect(), t.symbol, f(t.parent)))
            .collect();
        transitions.sort();
        transitions.dedup();
        let final_states = self.final_states.iter().map(&mut f).collect();
        Self::index(transitions, final_states)
    }

    /// Removes states that no tree can reach (bottom-up).
    pub fn remove_unreachable_states(&self) -> TreeAutomaton {
        let mut reachable = Macrostate::new();
        let mut changed = true;
        while changed {
            changed = false;
            for t in &self.transitions {
                if !reachable.contains(t.parent) && t.children.iter().all(|&c| reachable.contains(c)) {
                    reachable.insert(t.parent);
                    changed = true;
                }
            }
        }

        let transitions: Vec<Transition> = self
            .transitions
            .iter()
            .filter(|t| reachable.contains(t.parent))
            .filter(|t| t.children.iter().all(|&c| reachable.contains(c)))
            .cloned()
            .collect();
        debug!(
            "remove_unreachable_states: {} -> {} transitions",
            self.transitions.len(),
            transitions.len()
        );
        Self::index(transitions, self.final_states.intersection(&reachable))
    }

    /// Removes states from which no final state can be reached (top-down).
    pub fn remove_useless_states(&self) -> TreeAutomaton {
        let mut useful = self.final_states.clone();
        let mut changed = true;
        while changed {
            changed = false;
            for t in &self.transitions {
                if useful.contains(t.parent) {
                    for &c in &t.children {
                        changed |= useful.insert(c);
                    }
                }
            }
        }

        let transitions: Vec<Transition> = self
            .transitions
            .iter()
            .filter(|t| useful.contains(t.parent))
            .cloned()
            .collect();
        debug!(
            "remove_useless_states: {} -> {} transitions",
            self.transitions.len(),
            transitions.len()
        );
        Self::index(transitions, self.final_states.clone())
    }

    /// Removes unreachable and useless states.
    pub fn trim(&self) -> TreeAutomaton {
        self.remove_unreachable_states().remove_useless_states()
    }
}

impl TreeAutomatonView for TreeAutomaton {
    fn final_states(&self) -> &Macrostate {
        &self.final_states
    }

    fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    fn transitions_with_parent(&self, parent: State) -> &[TransitionId] {
        self.by_parent.get(&parent).map_or(&[], |ids| ids.as_slice())
    }

    fn transitions_with_symbol_and_child_at(&self, symbol: Symbol, position: usize, child: State) -> &[TransitionId] {
        self.by_child
            .get(&(symbol, position, child))
            .map_or(&[], |ids| ids.as_slice())
    }

    fn leaf_states(&self, symbol: Symbol) -> Macrostate {
        self.leaves.get(&symbol).cloned().unwrap_or_default()
    }
}

impl fmt::Display for TreeAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final states {}", self.final_states)?;
        writeln!(f, "Transitions")?;
        for t in &self.transitions {
            writeln!(f, "  {}", t)?;
        }
        Ok(())
    }
}

/// Collects transitions and final states, then validates and indexes them.
#[derive(Debug, Clone, Default)]
pub struct TreeAutomatonBuilder {
    transitions: Vec<Transition>,
    final_states: Vec<State>,
}

impl TreeAutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `symbol(children) -> parent`.
    pub fn transition<S>(mut self, symbol: impl Into<Symbol>, children: impl IntoIterator<Item = S>, parent: impl Into<State>) -> Self
    where
        S: Into<State>,
    {
        let children = children.into_iter().map(Into::into).collect();
        self.add_transition(Transition::new(children, symbol.into(), parent.into()));
        self
    }

    /// Adds the leaf transition `symbol -> parent`.
    pub fn leaf(self, symbol: impl Into<Symbol>, parent: impl Into<State>) -> Self {
        self.transition(symbol, std::iter::empty::<State>(), parent)
    }

    pub fn final_state(mut self, state: impl Into<State>) -> Self {
        self.final_states.push(state.into());
        self
    }

    pub fn add_transition(&mut self, transition: Transition) -> &mut Self {
        self.transitions.push(transition);
        self
    }

    pub fn add_final_state(&mut self, state: State) -> &mut Self {
        self.final_states.push(state);
        self
    }

    /// Validates the ranked alphabet and builds the automaton.
    ///
    /// Fails with [`Error::InconsistentArity`] if a symbol is used with two arities.
    pub fn build(self) -> Result<TreeAutomaton> {
        let mut arities: HashMap<Symbol, usize> = HashMap::new();
        for t in &self.transitions {
            let expected = *arities.entry(t.symbol).or_insert(t.arity());
            if expected != t.arity() {
                return Err(Error::InconsistentArity {
                    symbol: t.symbol,
                    expected,
                    found: t.arity(),
                });
            }
        }

        let mut transitions = self.transitions;
        transitions.sort();
        transitions.dedup();
        let final_states = self.final_states.into_iter().collect();
        Ok(TreeAutomaton::index(transitions, final_states))
    }
}
