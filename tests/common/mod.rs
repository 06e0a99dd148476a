//! Shared helpers for integration tests: random automata and a brute-force oracle.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use tacheck::automaton::{Transition, TreeAutomaton, TreeAutomatonBuilder, TreeAutomatonView};
use tacheck::macrostate::Macrostate;
use tacheck::types::{State, Symbol};

/// Leaves `a`, `b`, unary `g`, binary `f`.
pub const ALPHABET: [(u32, usize); 4] = [(0, 0), (1, 0), (2, 1), (3, 2)];

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Every tuple of length `arity` over `0..n`.
fn index_tuples(n: usize, arity: usize) -> Vec<Vec<usize>> {
    let mut result = vec![Vec::new()];
    for _ in 0..arity {
        result = result
            .into_iter()
            .flat_map(|prefix| {
                (0..n).map(move |i| {
                    let mut t = prefix.clone();
                    t.push(i);
                    t
                })
            })
            .collect();
    }
    result
}

/// Random transitions over `ALPHABET`, each possible one kept with probability `density`.
fn random_transitions(rng: &mut impl Rng, states: u32, density: f64) -> Vec<Transition> {
    let mut transitions = Vec::new();
    for &(symbol, arity) in &ALPHABET {
        for tuple in index_tuples(states as usize, arity) {
            let children: Vec<State> = tuple.iter().map(|&i| State::new(i as u32)).collect();
            for parent in 0..states {
                let p = if arity == 0 { 0.4 } else { density };
                if rng.random_bool(p) {
                    transitions.push(Transition::new(children.clone(), Symbol::new(symbol), State::new(parent)));
                }
            }
        }
    }
    transitions
}

fn build(transitions: &[Transition], finals: impl IntoIterator<Item = u32>) -> TreeAutomaton {
    let mut builder = TreeAutomatonBuilder::new();
    for t in transitions {
        builder.add_transition(t.clone());
    }
    for q in finals {
        builder.add_final_state(State::new(q));
    }
    builder.build().unwrap()
}

/// A random automaton over `ALPHABET` with `states` states.
pub fn random_automaton(rng: &mut impl Rng, states: u32, density: f64) -> TreeAutomaton {
    let transitions = random_transitions(rng, states, density);
    let finals: Vec<u32> = (0..states).filter(|_| rng.random_bool(0.4)).collect();
    build(&transitions, finals)
}

/// A copy of `aut` with extra random transitions and final states.
///
/// The language of `aut` is included in the language of the result.
pub fn random_superset(rng: &mut impl Rng, aut: &TreeAutomaton, states: u32, density: f64) -> TreeAutomaton {
    let mut transitions = aut.transitions().to_vec();
    transitions.extend(random_transitions(rng, states, density));
    let mut finals: Vec<u32> = aut.final_states().iter().map(State::id).collect();
    if rng.random_bool(0.3) {
        finals.push(rng.random_range(0..states));
    }
    build(&transitions, finals)
}

/// A copy of `aut` with states renamed by a random permutation of `0..states`.
pub fn shuffled(rng: &mut impl Rng, aut: &TreeAutomaton, states: u32) -> TreeAutomaton {
    let mut perm: Vec<u32> = (0..states).collect();
    perm.shuffle(rng);
    aut.relabel(|q| State::new(perm[q.id() as usize]))
}

/// States reached by `aut` on a tree whose children reach `children`.
fn step(aut: &TreeAutomaton, symbol: Symbol, children: &[&Macrostate]) -> Macrostate {
    aut.transitions()
        .iter()
        .filter(|t| t.symbol == symbol && t.children.len() == children.len())
        .filter(|t| t.children.iter().zip(children).all(|(&c, m)| m.contains(c)))
        .map(|t| t.parent)
        .collect()
}

/// Every couple of macrostates reached by the same tree, computed naively to a fixpoint.
pub fn reachable_couples(a: &TreeAutomaton, b: &TreeAutomaton) -> Vec<(Macrostate, Macrostate)> {
    let mut seen: BTreeSet<(Macrostate, Macrostate)> = BTreeSet::new();
    loop {
        let current: Vec<_> = seen.iter().cloned().collect();
        let mut added = false;
        for &(symbol, arity) in &ALPHABET {
            let symbol = Symbol::new(symbol);
            for combo in index_tuples(current.len(), arity) {
                let left: Vec<&Macrostate> = combo.iter().map(|&i| &current[i].0).collect();
                let right: Vec<&Macrostate> = combo.iter().map(|&i| &current[i].1).collect();
                let couple = (step(a, symbol, &left), step(b, symbol, &right));
                added |= seen.insert(couple);
            }
        }
        if !added {
            return seen.into_iter().collect();
        }
    }
}

/// Exact `L(a) ⊆ L(b)` by exploring all reachable couples.
pub fn brute_force_inclusion(a: &TreeAutomaton, b: &TreeAutomaton) -> bool {
    reachable_couples(a, b)
        .iter()
        .all(|(x, y)| !a.is_accepting(x) || b.is_accepting(y))
}

/// Exact `L(a) = L(b)`.
pub fn brute_force_equivalence(a: &TreeAutomaton, b: &TreeAutomaton) -> bool {
    reachable_couples(a, b)
        .iter()
        .all(|(x, y)| a.is_accepting(x) == b.is_accepting(y))
}

/// Distinct outcomes, for sanity checks that random cases cover both verdicts.
pub fn outcomes(results: &[bool]) -> HashSet<bool> {
    results.iter().copied().collect()
}
