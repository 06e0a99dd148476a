//! Implication tests: does a couple follow from a set of known couples?
//!
//! In equivalence mode a known couple `(A, B)` states `L(A) = L(B)`. Reading
//! couples as sets over the disjoint union of both state spaces, the known
//! couples generate a congruence with respect to union. A set `Z` is put in
//! normal form by repeatedly applying: if `A ⊆ Z` or `B ⊆ Z`, then
//! `Z := Z ∪ A ∪ B`. A couple `(X, Y)` belongs to the congruence iff `X` and
//! `Y` have the same normal form.
//!
//! In inclusion mode a known couple `(A, B)` states `L(A) ⊆ L(B)`, and
//! `(X, Y)` follows when `X` is covered by the `A`s of known couples whose
//! `B` is contained in `Y`.

use crate::bitset::BitSet;
use crate::macrostate::{Couple, Macrostate};

/// Applies every not yet visited known couple that can extend `track`.
///
/// Returns true if `track` grew.
fn sweep(known: &[Couple], track: &mut Couple, visited: &mut BitSet) -> bool {
    let mut grew = false;
    for (i, k) in known.iter().enumerate() {
        if visited.contains(i) {
            continue;
        }
        if k.smaller.is_subset_of(&track.smaller) || k.bigger.is_subset_of(&track.bigger) {
            visited.insert(i);
            grew |= track.extend_with(k);
        }
    }
    grew
}

/// Checks whether `couple` lies in the congruence closure of `known`.
///
/// The tracks started at `(X, ∅)` and `(∅, Y)` are saturated alternately and
/// the test succeeds as soon as they coincide.
///
/// With `lax`, only the closure under union is tested: `(X, Y)` must be the
/// union of the known couples contained in it. This is a single pass and
/// misses implications that need transitivity or symmetry.
pub fn in_congruence_closure(known: &[Couple], couple: &Couple, lax: bool) -> bool {
    if lax {
        return in_union_closure(known, couple);
    }

    let mut left = Couple::new(couple.smaller.clone(), Macrostate::new());
    let mut right = Couple::new(Macrostate::new(), couple.bigger.clone());
    if left == right {
        return true;
    }

    let mut visited = [BitSet::new(known.len()), BitSet::new(known.len())];
    loop {
        let left_grew = sweep(known, &mut left, &mut visited[0]);
        if left == right {
            return true;
        }
        let right_grew = sweep(known, &mut right, &mut visited[1]);
        if left == right {
            return true;
        }
        if !left_grew && !right_grew {
            return false;
        }
    }
}

fn in_union_closure(known: &[Couple], couple: &Couple) -> bool {
    let mut union = Couple::default();
    for k in known {
        if k.is_subset_of(couple) {
            union.extend_with(k);
            if union == *couple {
                return true;
            }
        }
    }
    union == *couple
}

/// Checks whether `X` is covered by the known couples `(A, B)` with `B ⊆ Y`.
///
/// The answer does not depend on `lax`. With it, the sweep stops as soon as
/// `X` is covered.
pub fn in_inclusion_closure(known: &[Couple], couple: &Couple, lax: bool) -> bool {
    let mut covered = Macrostate::new();
    for k in known {
        if k.bigger.is_subset_of(&couple.bigger) {
            covered.extend_with(&k.smaller);
            if lax && couple.smaller.is_subset_of(&covered) {
                return true;
            }
        }
    }
    couple.smaller.is_subset_of(&covered)
}

/// Checks whether some known `(A, B)` subsumes `(X, Y)`: `X ⊆ A` and `B ⊆ Y`.
pub fn is_subsumed(known: &[Couple], couple: &Couple) -> bool {
    known
        .iter()
        .any(|k| couple.smaller.is_subset_of(&k.smaller) && k.bigger.is_subset_of(&couple.bigger))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::types::State;

    fn c<const N: usize, const M: usize>(x: [u32; N], y: [u32; M]) -> Couple {
        Couple::new(x.into(), y.into())
    }

    #[test]
    fn test_congruence_exact_and_union() {
        let known = vec![c([1], [5]), c([2], [6])];
        for lax in [false, true] {
            assert!(in_congruence_closure(&known, &c([1], [5]), lax));
            assert!(in_congruence_closure(&known, &c([1, 2], [5, 6]), lax));
            assert!(!in_congruence_closure(&known, &c([1], [6]), lax));
            assert!(!in_congruence_closure(&known, &c([1, 2], [5]), lax));
        }
    }

    #[test]
    fn test_congruence_containment_trigger() {
        // ({1, 2}, {5}) does not relate {1} with {5}.
        let known = vec![c([1, 2], [5])];
        assert!(!in_congruence_closure(&known, &c([1], [5]), false));
        assert!(in_congruence_closure(&known, &c([1, 2], [5]), false));
    }

    #[test]
    fn test_congruence_transitive() {
        // X ~ Y and Y ~ Z (through the bigger side) give ({1} ∪ {3}) ~ {5}.
        let known = vec![c([1], [5]), c([3], [5])];
        assert!(in_congruence_closure(&known, &c([1, 3], [5]), false));
        assert!(in_congruence_closure(&known, &c([3], [5]), false));
    }

    #[test]
    fn test_congruence_lax_incomplete() {
        // {1} ~ {5} ~ {3} ~ {6} relates {1} with {6} only through transitivity.
        let known = vec![c([1], [5]), c([3], [5]), c([3], [6])];
        assert!(in_congruence_closure(&known, &c([1], [6]), false));
        assert!(!in_congruence_closure(&known, &c([1], [6]), true));
        assert!(in_congruence_closure(&known, &c([1, 3], [5]), true));
    }

    #[test]
    fn test_congruence_empty() {
        for lax in [false, true] {
            assert!(in_congruence_closure(&[], &Couple::default(), lax));
            assert!(!in_congruence_closure(&[], &c([1], []), lax));
        }
    }

    #[test]
    fn test_inclusion_closure() {
        let known = vec![c([1], [5]), c([2], [6, 7])];
        for lax in [false, true] {
            assert!(in_inclusion_closure(&known, &c([1], [5]), lax));
            assert!(in_inclusion_closure(&known, &c([1, 2], [5, 6, 7]), lax));
            assert!(in_inclusion_closure(&known, &c([1], [4, 5]), lax));
            assert!(!in_inclusion_closure(&known, &c([1, 2], [5, 6]), lax));
            assert!(!in_inclusion_closure(&known, &c([3], [5, 6, 7]), lax));
            assert!(in_inclusion_closure(&known, &c([], [9]), lax));
        }
    }

    #[test]
    fn test_inclusion_closure_lax_agrees() {
        let subsets = |states: [u32; 3]| -> Vec<Macrostate> {
            (0..8u32)
                .map(|bits| {
                    states
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| bits & (1 << i) != 0)
                        .map(|(_, &s)| State::new(s))
                        .collect()
                })
                .collect()
        };
        let couples: Vec<Couple> = subsets([1, 2, 3])
            .into_iter()
            .flat_map(|x| subsets([5, 6, 7]).into_iter().map(move |y| Couple::new(x.clone(), y)))
            .collect();

        for known in couples.chunks(5) {
            for q in &couples {
                assert_eq!(
                    in_inclusion_closure(known, q, false),
                    in_inclusion_closure(known, q, true),
                    "{:?} against {:?}",
                    q,
                    known
                );
            }
        }
    }

    #[test]
    fn test_subsumption() {
        let known = vec![c([1, 2], [5])];
        assert!(is_subsumed(&known, &c([1], [5, 6])));
        assert!(is_subsumed(&known, &c([1, 2], [5])));
        assert!(!is_subsumed(&known, &c([1, 3], [5])));
        assert!(!is_subsumed(&known, &c([1], [6])));
    }

    #[test]
    fn test_monotone() {
        let small = vec![c([1], [5])];
        let big = vec![c([1], [5]), c([2], [6]), c([3], [7])];
        let queries = [c([1], [5]), c([1, 2], [5, 6]), c([1], [5, 8])];
        for q in &queries {
            for lax in [false, true] {
                if in_congruence_closure(&small, q, lax) {
                    assert!(in_congruence_closure(&big, q, lax));
                }
                if in_inclusion_closure(&small, q, lax) {
                    assert!(in_inclusion_closure(&big, q, lax));
                }
            }
            if is_subsumed(&small, q) {
                assert!(is_subsumed(&big, q));
            }
        }
    }
}
