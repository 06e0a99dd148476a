//! Hand-written inclusion and equivalence scenarios, run under every algorithm.

use tacheck::automaton::TreeAutomaton;
use tacheck::check::{check_equivalence, check_inclusion};
use tacheck::config::{Algorithm, BisimulationOptions, CheckConfig, Direction};
use tacheck::error::Error;

use test_log::test;

fn configs() -> Vec<CheckConfig> {
    let mut configs = vec![
        CheckConfig::new(Algorithm::Antichains {
            direction: Direction::Downward,
        }),
        CheckConfig::new(Algorithm::Antichains {
            direction: Direction::Upward,
        }),
    ];
    for options in BisimulationOptions::all() {
        configs.push(CheckConfig::new(Algorithm::Bisimulation(options)));
        configs.push(CheckConfig::new(Algorithm::Bisimulation(options)).with_strict_emptiness(true));
    }
    configs
}

// ─── Scenario 1: unreachable extra state ──────────────────────────────────────

#[test]
fn unreachable_state_is_irrelevant() {
    let smaller = TreeAutomaton::builder().leaf(0, 0).final_state(0).build().unwrap();
    // State 1 is final but no tree reaches it.
    let bigger = TreeAutomaton::builder()
        .leaf(0, 0)
        .final_state(0)
        .final_state(1)
        .build()
        .unwrap();

    for config in configs() {
        assert!(check_inclusion(&smaller, &bigger, &config).unwrap(), "{:?}", config);
        assert!(check_inclusion(&bigger, &smaller, &config).unwrap(), "{:?}", config);
        assert!(check_equivalence(&smaller, &bigger, &config).unwrap(), "{:?}", config);
    }
}

// ─── Scenario 2: f(a, a) versus f(a, b) ───────────────────────────────────────

#[test]
fn different_leaf_patterns() {
    let smaller = TreeAutomaton::builder()
        .leaf(0, 0)
        .transition(2, [0, 0], 1)
        .final_state(1)
        .build()
        .unwrap();
    let bigger = TreeAutomaton::builder()
        .leaf(0, 0)
        .leaf(1, 2)
        .transition(2, [0, 2], 1)
        .final_state(1)
        .build()
        .unwrap();

    for config in configs() {
        assert!(!check_inclusion(&smaller, &bigger, &config).unwrap(), "{:?}", config);
        assert!(!check_inclusion(&bigger, &smaller, &config).unwrap(), "{:?}", config);
        assert!(!check_equivalence(&smaller, &bigger, &config).unwrap(), "{:?}", config);
    }
}

// ─── Scenario 3: renamed states ───────────────────────────────────────────────

#[test]
fn renamed_states_are_equivalent() {
    // Binary trees over a, b with an odd number of b leaves.
    let aut = TreeAutomaton::builder()
        .leaf(0, 0)
        .leaf(1, 1)
        .transition(2, [0, 0], 0)
        .transition(2, [0, 1], 1)
        .transition(2, [1, 0], 1)
        .transition(2, [1, 1], 0)
        .final_state(1)
        .build()
        .unwrap();
    let renamed = aut.relabel(|q| (7 - q.id()).into());

    for config in configs() {
        assert!(check_equivalence(&aut, &renamed, &config).unwrap(), "{:?}", config);
        assert!(check_equivalence(&renamed, &aut, &config).unwrap(), "{:?}", config);
    }
}

// ─── Nondeterminism ───────────────────────────────────────────────────────────

#[test]
fn nondeterministic_union_covers_product() {
    // f(x, y) for x, y ∈ {a, b}.
    let smaller = TreeAutomaton::builder()
        .leaf(0, 0)
        .leaf(1, 0)
        .transition(2, [0, 0], 1)
        .final_state(1)
        .build()
        .unwrap();
    // f(a|b, a) ∪ f(a|b, b), split over two final states.
    let bigger = TreeAutomaton::builder()
        .leaf(0, 0)
        .leaf(1, 0)
        .leaf(0, 1)
        .leaf(1, 2)
        .transition(2, [0, 1], 3)
        .transition(2, [0, 2], 4)
        .final_state(3)
        .final_state(4)
        .build()
        .unwrap();

    for config in configs() {
        assert!(check_inclusion(&smaller, &bigger, &config).unwrap(), "{:?}", config);
        assert!(check_equivalence(&smaller, &bigger, &config).unwrap(), "{:?}", config);
    }
}

#[test]
fn empty_languages() {
    let empty = TreeAutomaton::builder().leaf(0, 0).build().unwrap();
    let also_empty = TreeAutomaton::builder()
        .transition(1, [0], 0)
        .final_state(0)
        .build()
        .unwrap();
    let leaf = TreeAutomaton::builder().leaf(0, 0).final_state(0).build().unwrap();

    for config in configs() {
        assert!(check_equivalence(&empty, &also_empty, &config).unwrap(), "{:?}", config);
        assert!(check_inclusion(&empty, &leaf, &config).unwrap(), "{:?}", config);
        assert!(!check_inclusion(&leaf, &empty, &config).unwrap(), "{:?}", config);
    }
}

// ─── Errors ───────────────────────────────────────────────────────────────────

#[test]
fn inconsistent_arity_across_automata() {
    let unary = TreeAutomaton::builder().leaf(0, 0).transition(1, [0], 0).final_state(0).build().unwrap();
    let binary = TreeAutomaton::builder()
        .leaf(0, 0)
        .transition(1, [0, 0], 0)
        .final_state(0)
        .build()
        .unwrap();

    for config in configs() {
        assert!(
            matches!(check_inclusion(&unary, &binary, &config), Err(Error::InconsistentArity { .. })),
            "{:?}",
            config
        );
        assert!(
            matches!(check_inclusion(&binary, &unary, &config), Err(Error::InconsistentArity { .. })),
            "{:?}",
            config
        );
        assert!(
            matches!(check_equivalence(&unary, &binary, &config), Err(Error::InconsistentArity { .. })),
            "{:?}",
            config
        );
    }
}

#[test]
fn inconsistent_arity_within_automaton() {
    let result = TreeAutomaton::builder()
        .transition(1, [0], 0)
        .transition(1, [0, 0], 0)
        .build();
    assert!(matches!(result, Err(Error::InconsistentArity { .. })));
}

#[test]
fn step_budget_is_reported() {
    let aut = TreeAutomaton::builder()
        .leaf(0, 0)
        .transition(1, [0], 1)
        .transition(1, [1], 0)
        .final_state(0)
        .build()
        .unwrap();
    for config in configs() {
        let config = config.with_max_steps(Some(1));
        match check_equivalence(&aut, &aut, &config) {
            Err(Error::Inconclusive { steps }) => assert_eq!(steps, 1),
            other => panic!("expected an inconclusive result for {:?}, got {:?}", config, other),
        }
    }
}
