//! Successor sets and post images over both automata.

use std::collections::HashMap;
use std::rc::Rc;

use crate::automaton::TreeAutomatonView;
use crate::cache::Cache;
use crate::choice::all_functions;
use crate::error::Result;
use crate::macrostate::{Couple, Macrostate};
use crate::types::{RankedSymbol, Symbol, TransitionId};
use crate::utils::{intersect_sorted, normalize};

/// One of the two compared automata.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Smaller,
    Bigger,
}

type SuccessorKey = (Side, Symbol, usize, Macrostate);

/// Computes post images of couples, memoizing successor sets on demand.
pub struct PostImage<'a, A, B> {
    smaller: &'a A,
    bigger: &'a B,
    cache: Option<Cache<SuccessorKey, Rc<[TransitionId]>>>,
    variants: HashMap<(usize, usize), Rc<Vec<Vec<usize>>>>,
}

impl<'a, A, B> PostImage<'a, A, B>
where
    A: TreeAutomatonView,
    B: TreeAutomatonView,
{
    pub fn new(smaller: &'a A, bigger: &'a B, use_cache: bool) -> Self {
        Self {
            smaller,
            bigger,
            cache: use_cache.then(Cache::new),
            variants: HashMap::new(),
        }
    }

    pub fn cache_hits(&self) -> usize {
        self.cache.as_ref().map_or(0, Cache::hits)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache.as_ref().map_or(0, Cache::misses)
    }

    /// Sorted IDs of the `symbol`-transitions of `side` whose child at
    /// `position` lies in `macrostate`.
    pub fn successors(&mut self, side: Side, symbol: Symbol, position: usize, macrostate: &Macrostate) -> Rc<[TransitionId]> {
        let (smaller, bigger) = (self.smaller, self.bigger);
        let compute = || -> Rc<[TransitionId]> {
            let mut ids = Vec::new();
            for state in macrostate {
                let found = match side {
                    Side::Smaller => smaller.transitions_with_symbol_and_child_at(symbol, position, state),
                    Side::Bigger => bigger.transitions_with_symbol_and_child_at(symbol, position, state),
                };
                ids.extend_from_slice(found);
            }
            normalize(&mut ids);
            Rc::from(ids)
        };

        match &mut self.cache {
            Some(cache) => {
                let key = (side, symbol, position, macrostate.clone());
                match cache.get_or_insert_with::<std::convert::Infallible>(key, || Ok(compute())) {
                    Ok(ids) => Rc::clone(ids),
                    Err(never) => match never {},
                }
            }
            None => compute(),
        }
    }

    /// Every assignment of `count` processed couples to `len` positions.
    fn variants(&mut self, len: usize, count: usize) -> Result<Rc<Vec<Vec<usize>>>> {
        if let Some(v) = self.variants.get(&(len, count)) {
            return Ok(Rc::clone(v));
        }
        let v = Rc::new(all_functions(len, count)?);
        // Within a run the done list only grows.
        self.variants.retain(|&(l, c), _| l != len || c > count);
        self.variants.insert((len, count), Rc::clone(&v));
        Ok(v)
    }

    fn parents(&self, side: Side, ids: &[TransitionId]) -> Macrostate {
        match side {
            Side::Smaller => ids.iter().map(|&id| self.smaller.transition(id).parent).collect(),
            Side::Bigger => ids.iter().map(|&id| self.bigger.transition(id).parent).collect(),
        }
    }

    /// Post image of one side: parents of the `symbol`-transitions whose child
    /// at `position` lies in `actual` and whose other children lie in `others`.
    fn post_side(
        &mut self,
        side: Side,
        symbol: Symbol,
        position: usize,
        actual: &Macrostate,
        others: &[&Macrostate],
    ) -> Macrostate {
        let mut ids = self.successors(side, symbol, position, actual).to_vec();
        let other_positions = (0..=others.len()).filter(|&i| i != position);
        for (i, macrostate) in other_positions.zip(others) {
            if ids.is_empty() {
                break;
            }
            let restrict = self.successors(side, symbol, i, macrostate);
            ids = intersect_sorted(&ids, &restrict);
        }
        self.parents(side, &ids)
    }

    /// All candidate couples obtained by placing `actual` at one position of
    /// `ranked` and processed couples at the other positions.
    ///
    /// `done` must already contain `actual`. Couples empty on both sides are omitted.
    pub fn post(&mut self, actual: &Couple, done: &[Couple], ranked: RankedSymbol) -> Result<Vec<Couple>> {
        let arity = ranked.arity;
        if arity == 0 {
            return Ok(Vec::new());
        }

        let variants = self.variants(arity - 1, done.len())?;
        let mut result = Vec::new();
        for position in 0..arity {
            for variant in variants.iter() {
                let smaller_others: Vec<&Macrostate> = variant.iter().map(|&d| &done[d].smaller).collect();
                let bigger_others: Vec<&Macrostate> = variant.iter().map(|&d| &done[d].bigger).collect();
                let smaller = self.post_side(Side::Smaller, ranked.symbol, position, &actual.smaller, &smaller_others);
                let bigger = self.post_side(Side::Bigger, ranked.symbol, position, &actual.bigger, &bigger_others);
                if smaller.is_empty() && bigger.is_empty() {
                    continue;
                }
                result.push(Couple::new(smaller, bigger));
            }
        }
        normalize(&mut result);
        Ok(result)
    }
}
