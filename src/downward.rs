//! Downward (top-down) antichain inclusion checking.
//!
//! The engine decides `L(smaller) ⊆ L(bigger)` by proving, for every final
//! state `q` of `smaller`, that `q ⊑ F` where `F` are the final states of
//! `bigger`. Here `q ⊑ S` means that every tree accepted from `q` is accepted
//! from some state of `S`.
//!
//! Proving `q ⊑ S` looks at every transition `a(q1, …, qn) -> q` of `smaller`
//! and the tuples `(r_j1, …, r_jn)` of the `a`-transitions of `bigger` whose
//! parent lies in `S`. The product `L(q1) × … × L(qn)` must be covered by the
//! union of the products `L(r_j1) × … × L(r_jn)`. This holds iff for every
//! *choice function* `cf`, assigning each tuple `j` a position `cf(j)`, some
//! position `p` satisfies `q_p ⊑ {r_jp | cf(j) = p}`.
//!
//! Subproblems are memoized:
//!
//! - a *workset* of pairs under expansion, used as co-inductive assumptions;
//! - a *negative* antichain of failed pairs (maximal macrostates);
//! - a stack of *positive* antichains (minimal macrostates), one layer per
//!   pair under expansion. A success proven while assumptions are open only
//!   holds if those assumptions do, so it lives in the layer of the pair that
//!   proved it, is merged into the parent layer when that pair succeeds, and
//!   is discarded when it fails.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::debug;

use crate::alphabet::RankedAlphabet;
use crate::antichain::Antichain;
use crate::automaton::TreeAutomatonView;
use crate::cache::Cache;
use crate::choice::{checked_count, ChoiceFunctions};
use crate::error::{Error, Result};
use crate::macrostate::Macrostate;
use crate::types::{State, Symbol};

/// Counters collected by [`DownwardInclusion`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Pairs that were expanded through their transitions.
    pub expansions: usize,
    /// Queries answered by a co-inductive assumption.
    pub workset_hits: usize,
    /// Queries answered by the positive antichain.
    pub positive_hits: usize,
    /// Queries answered by the negative antichain.
    pub negative_hits: usize,
    /// Choice functions enumerated.
    pub choice_functions: usize,
    /// Hits and misses of the negative lookup memo.
    pub cache_hits: usize,
    pub cache_misses: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expansions={}, workset_hits={}, positive_hits={}, negative_hits={}, choice_functions={}, cache={}/{}",
            self.expansions,
            self.workset_hits,
            self.positive_hits,
            self.negative_hits,
            self.choice_functions,
            self.cache_hits,
            self.cache_hits + self.cache_misses
        )
    }
}

/// Downward antichain inclusion checker for one pair of automata.
pub struct DownwardInclusion<'a, A, B> {
    smaller: &'a A,
    bigger: &'a B,
    workset: Vec<(State, Macrostate)>,
    negative: Antichain,
    positive: Vec<Antichain>,
    /// Exact negative lookups, per state.
    negative_memo: HashMap<State, Cache<Macrostate, ()>>,
    max_steps: Option<usize>,
    stats: Stats,
}

impl<'a, A, B> DownwardInclusion<'a, A, B>
where
    A: TreeAutomatonView,
    B: TreeAutomatonView,
{
    pub fn new(smaller: &'a A, bigger: &'a B) -> Self {
        Self {
            smaller,
            bigger,
            workset: Vec::new(),
            negative: Antichain::maximal(),
            positive: Vec::new(),
            negative_memo: HashMap::new(),
            max_steps: None,
            stats: Stats::default(),
        }
    }

    /// Limits the number of expansions; exceeding it yields [`Error::Inconclusive`].
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Pairs known not to be included.
    pub fn negative(&self) -> &Antichain {
        &self.negative
    }

    /// Pairs known to be included without assumptions.
    ///
    /// Only meaningful after [`check`](Self::check) has returned.
    pub fn positive(&self) -> Option<&Antichain> {
        self.positive.first()
    }

    /// Decides `L(smaller) ⊆ L(bigger)`.
    ///
    /// Fails with [`Error::InconsistentArity`] if a symbol has different
    /// arities in the two automata.
    pub fn check(&mut self) -> Result<bool> {
        let alphabet = RankedAlphabet::joint(self.smaller, self.bigger)?;
        self.workset.clear();
        self.negative = Antichain::maximal();
        self.positive = vec![Antichain::minimal()];
        self.negative_memo.clear();
        self.stats = Stats::default();

        let smaller = self.smaller;
        let targets = self.bigger.final_states().clone();
        debug!(
            "downward check: {} final states against {}, alphabet {}",
            smaller.final_states().len(),
            targets,
            alphabet
        );

        let mut result = true;
        for q in smaller.final_states() {
            if !self.expand(q, &targets)? {
                debug!("downward check: {} is not included in {}", q, targets);
                result = false;
                break;
            }
        }

        self.stats.cache_hits = self.negative_memo.values().map(Cache::hits).sum();
        self.stats.cache_misses = self.negative_memo.values().map(Cache::misses).sum();
        debug!(
            "downward check: result={}, {}, antichains +{}/-{}, memo {}",
            result,
            self.stats,
            self.positive.first().map_or(0, Antichain::len),
            self.negative.len(),
            self.negative_memo.values().map(Cache::len).sum::<usize>()
        );
        Ok(result)
    }

    /// Decides `state ⊑ macrostate`.
    pub fn expand(&mut self, state: State, macrostate: &Macrostate) -> Result<bool> {
        if self
            .workset
            .iter()
            .any(|(q, w)| *q == state && w.is_subset_of(macrostate))
        {
            self.stats.workset_hits += 1;
            return Ok(true);
        }
        if self.is_known_negative(state, macrostate) {
            self.stats.negative_hits += 1;
            return Ok(false);
        }
        if self.positive.iter().any(|layer| layer.covers(state, macrostate)) {
            self.stats.positive_hits += 1;
            return Ok(true);
        }

        self.stats.expansions += 1;
        if let Some(max) = self.max_steps {
            if self.stats.expansions > max {
                return Err(Error::Inconclusive { steps: max });
            }
        }

        self.workset.push((state, macrostate.clone()));
        self.positive.push(Antichain::minimal());
        let result = self.expand_transitions(state, macrostate);
        self.workset.pop();
        let layer = self.positive.pop().unwrap_or_else(Antichain::minimal);
        let included = result?;

        if included {
            if let Some(parent) = self.positive.last_mut() {
                parent.merge(layer);
                parent.insert(state, macrostate.clone());
            }
        } else {
            self.negative.insert(state, macrostate.clone());
        }
        Ok(included)
    }

    fn is_known_negative(&mut self, state: State, macrostate: &Macrostate) -> bool {
        let memo = self.negative_memo.entry(state).or_default();
        if memo.get(macrostate).is_some() {
            return true;
        }
        // The negative antichain only grows, so a hit stays valid.
        if self.negative.covers(state, macrostate) {
            memo.insert(macrostate.clone(), ());
            return true;
        }
        false
    }

    fn expand_transitions(&mut self, state: State, macrostate: &Macrostate) -> Result<bool> {
        let smaller = self.smaller;
        let bigger = self.bigger;

        let mut lhs: BTreeMap<Symbol, Vec<&'a [State]>> = BTreeMap::new();
        for &id in smaller.transitions_with_parent(state) {
            let t = smaller.transition(id);
            lhs.entry(t.symbol).or_default().push(&t.children);
        }

        let mut rhs: BTreeMap<Symbol, Vec<&'a [State]>> = BTreeMap::new();
        for p in macrostate {
            for &id in bigger.transitions_with_parent(p) {
                let t = bigger.transition(id);
                if lhs.contains_key(&t.symbol) {
                    rhs.entry(t.symbol).or_default().push(&t.children);
                }
            }
        }
        for tuples in rhs.values_mut() {
            tuples.sort_unstable();
            tuples.dedup();
        }

        for (symbol, tuples) in &lhs {
            let covering = rhs.get(symbol).map_or(&[][..], |v| v.as_slice());
            for children in tuples {
                if !self.is_covered(children, covering)? {
                    debug!("{} ⋢ {}: {}{:?} is not covered", state, macrostate, symbol, children);
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Checks whether the product of the languages of `lhs` is covered by the
    /// union of the products of the `rhs` tuples.
    fn is_covered(&mut self, lhs: &[State], rhs: &[&[State]]) -> Result<bool> {
        let arity = lhs.len();
        if arity == 0 {
            return Ok(!rhs.is_empty());
        }

        if rhs.is_empty() {
            for &child in lhs {
                if self.expand(child, &Macrostate::new())? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        'tuples: for r in rhs {
            for (i, &child) in lhs.iter().enumerate() {
                if !self.expand(child, &Macrostate::singleton(r[i]))? {
                    continue 'tuples;
                }
            }
            return Ok(true);
        }

        checked_count(rhs.len(), arity)?;
        let mut memo: Cache<(usize, Macrostate), bool> = Cache::new();
        let mut functions = ChoiceFunctions::new(rhs.len(), arity);
        while let Some(cf) = functions.advance() {
            self.stats.choice_functions += 1;

            let mut chosen = vec![Vec::new(); arity];
            for (j, &p) in cf.iter().enumerate() {
                chosen[p].push(rhs[j][p]);
            }

            let mut refuted = false;
            for (p, states) in chosen.into_iter().enumerate() {
                let target: Macrostate = states.into_iter().collect();
                let included = *memo.get_or_insert_with((p, target.clone()), || self.expand(lhs[p], &target))?;
                if included {
                    refuted = true;
                    break;
                }
            }
            if !refuted {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
