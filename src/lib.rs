//! # tacheck: inclusion and equivalence of tree automata
//!
//! **`tacheck`** decides whether the language of one finite tree automaton is
//! included in, or equal to, the language of another.
//!
//! ## Algorithms
//!
//! - **Downward antichains** ([`downward`]): proves `q ⊑ S` ("every tree
//!   accepted from state `q` is accepted from some state of `S`") top-down,
//!   from the final states towards the leaves. Results are memoized in
//!   antichains of minimal (included) and maximal (not included) macrostates.
//! - **Upward bisimulation up to congruence** ([`bisimulation`]): explores
//!   pairs of macrostates reached by the same trees, bottom-up from the
//!   leaves, pruning pairs that follow from already explored ones.
//!
//! Both algorithms work on any automaton implementing
//! [`TreeAutomatonView`][crate::automaton::TreeAutomatonView], and neither
//! mutates its input.
//!
//! ## Basic Usage
//!
//! ```rust
//! use tacheck::automaton::TreeAutomaton;
//! use tacheck::check::{check_equivalence, check_inclusion};
//! use tacheck::config::{Algorithm, BisimulationOptions, CheckConfig};
//!
//! // Trees g(g(...g(a))) with an even number of g.
//! let even = TreeAutomaton::builder()
//!     .leaf(0, 0)
//!     .transition(1, [0], 1)
//!     .transition(1, [1], 0)
//!     .final_state(0)
//!     .build()?;
//!
//! // Any number of g.
//! let any = TreeAutomaton::builder()
//!     .leaf(0, 0)
//!     .transition(1, [0], 0)
//!     .final_state(0)
//!     .build()?;
//!
//! let downward = CheckConfig::default();
//! assert!(check_inclusion(&even, &any, &downward)?);
//! assert!(!check_inclusion(&any, &even, &downward)?);
//!
//! let upward = CheckConfig::new(Algorithm::Bisimulation(BisimulationOptions::default()));
//! assert!(check_equivalence(&even, &even, &upward)?);
//! assert!(!check_equivalence(&even, &any, &upward)?);
//! # Ok::<(), tacheck::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`automaton`]**: the [`TreeAutomatonView`][crate::automaton::TreeAutomatonView]
//!   trait and the explicit [`TreeAutomaton`][crate::automaton::TreeAutomaton].
//! - **[`macrostate`]**: sets of states and couples of them.
//! - **[`check`]**: entry points selecting an algorithm from a [`config::CheckConfig`].

pub mod alphabet;
pub mod antichain;
pub mod automaton;
pub mod bisimulation;
pub mod bitset;
pub mod cache;
pub mod check;
pub mod choice;
pub mod config;
pub mod downward;
pub mod error;
pub mod macrostate;
pub mod types;
pub mod utils;
