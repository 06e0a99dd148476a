//! Ranked alphabets.

use std::collections::BTreeMap;
use std::fmt;

use crate::automaton::TreeAutomatonView;
use crate::error::{Error, Result};
use crate::types::{RankedSymbol, Symbol};

/// A map from symbols to their arity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedAlphabet {
    arities: BTreeMap<Symbol, usize>,
}

impl RankedAlphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the ranked symbols used by the transitions of `aut`.
    pub fn of(aut: &impl TreeAutomatonView) -> Result<Self> {
        let mut alphabet = Self::new();
        for t in aut.transitions() {
            alphabet.insert(t.ranked_symbol())?;
        }
        Ok(alphabet)
    }

    /// The union of the alphabets of two automata.
    ///
    /// Fails if a symbol has different arities in the two automata.
    pub fn joint(a: &impl TreeAutomatonView, b: &impl TreeAutomatonView) -> Result<Self> {
        let mut alphabet = Self::of(a)?;
        for t in b.transitions() {
            alphabet.insert(t.ranked_symbol())?;
        }
        Ok(alphabet)
    }

    /// Adds a ranked symbol. Re-adding with the same arity is a no-op.
    pub fn insert(&mut self, ranked: RankedSymbol) -> Result<()> {
        let expected = *self.arities.entry(ranked.symbol).or_insert(ranked.arity);
        if expected != ranked.arity {
            return Err(Error::InconsistentArity {
                symbol: ranked.symbol,
                expected,
                found: ranked.arity,
            });
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = RankedSymbol> + '_ {
        self.arities.iter().map(|(&s, &a)| RankedSymbol::new(s, a))
    }

    pub fn leaves(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.iter().filter(|r| r.is_leaf()).map(|r| r.symbol)
    }

    /// Removes all 0-arity symbols.
    pub fn prune_leaves(&mut self) {
        self.arities.retain(|_, &mut arity| arity > 0);
    }
}

impl fmt::Display for RankedAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", r)?;
        }
        write!(f, "]")
    }
}
