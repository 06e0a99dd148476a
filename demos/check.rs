//! Compares two automata from a parameterized family and reports the verdict.
//!
//! ```bash
//! cargo run --example check -- modulo --size 6 --algorithm bisimulation --equivalence
//! ```

use clap::{Parser, ValueEnum};
use log::info;

use tacheck::automaton::TreeAutomaton;
use tacheck::check::{check_equivalence, check_inclusion};
use tacheck::config::{Algorithm, BisimulationOptions, CheckConfig, Direction};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Family {
    /// `g^k(a)` with `k ≡ 0 (mod 2n)` against `k ≡ 0 (mod n)`.
    Modulo,
    /// Binary trees containing a `b` leaf, deterministic against guessing.
    ContainsB,
    /// Complete binary trees of height at most `n` against all binary trees.
    Bounded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Method {
    Downward,
    Upward,
    Bisimulation,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Family of automata to compare.
    #[arg(value_enum, default_value = "modulo")]
    family: Family,

    /// Family parameter.
    #[clap(long, value_name = "INT", default_value = "4")]
    size: u32,

    /// Decision procedure.
    #[clap(long, value_enum, default_value = "downward")]
    algorithm: Method,

    /// Check equivalence instead of inclusion.
    #[clap(long)]
    equivalence: bool,

    /// Disable the successor cache (bisimulation only).
    #[clap(long)]
    no_cache: bool,

    /// Disable pruning up to congruence (bisimulation only).
    #[clap(long)]
    no_congruence: bool,

    /// Use the cheaper, incomplete implication test (bisimulation only).
    #[clap(long)]
    lax: bool,

    /// Also require both sides of every couple to be empty or non-empty together.
    #[clap(long)]
    strict_emptiness: bool,

    /// Give up after this many steps.
    #[clap(long, value_name = "INT")]
    max_steps: Option<usize>,

    /// Log level.
    #[clap(long, default_value = "info")]
    log: simplelog::LevelFilter,
}

/// `g^k(a)` with `k ≡ 0 (mod n)`.
fn modulo(n: u32) -> color_eyre::Result<TreeAutomaton> {
    let mut builder = TreeAutomaton::builder().leaf(0, 0).final_state(0);
    for q in 0..n {
        builder = builder.transition(1, [q], (q + 1) % n);
    }
    Ok(builder.build()?)
}

fn contains_b(guessing: bool) -> color_eyre::Result<TreeAutomaton> {
    let builder = TreeAutomaton::builder().leaf(0, 0).leaf(1, 1).final_state(1);
    let builder = if guessing {
        builder.leaf(1, 0).transition(2, [0, 0], 0).transition(2, [1, 0], 1).transition(2, [0, 1], 1)
    } else {
        builder
            .transition(2, [0, 0], 0)
            .transition(2, [0, 1], 1)
            .transition(2, [1, 0], 1)
            .transition(2, [1, 1], 1)
    };
    Ok(builder.build()?)
}

/// Complete binary trees over `a` of height at most `n`.
fn bounded(n: u32) -> color_eyre::Result<TreeAutomaton> {
    let mut builder = TreeAutomaton::builder().leaf(0, 0);
    for q in 0..=n {
        builder = builder.final_state(q);
        if q < n {
            builder = builder.transition(2, [q, q], q + 1);
        }
    }
    Ok(builder.build()?)
}

/// All binary trees over `a`.
fn unbounded() -> color_eyre::Result<TreeAutomaton> {
    Ok(TreeAutomaton::builder().leaf(0, 0).transition(2, [0, 0], 0).final_state(0).build()?)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    let (smaller, bigger) = match args.family {
        Family::Modulo => (modulo(2 * args.size)?, modulo(args.size)?),
        Family::ContainsB => (contains_b(false)?, contains_b(true)?),
        Family::Bounded => (bounded(args.size)?, unbounded()?),
    };
    println!("smaller:\n{}", smaller);
    println!("bigger:\n{}", bigger);

    let algorithm = match args.algorithm {
        Method::Downward => Algorithm::Antichains {
            direction: Direction::Downward,
        },
        Method::Upward => Algorithm::Antichains {
            direction: Direction::Upward,
        },
        Method::Bisimulation => Algorithm::Bisimulation(
            BisimulationOptions::default()
                .with_cache(!args.no_cache)
                .with_congruence(!args.no_congruence)
                .with_lax(args.lax),
        ),
    };
    let config = CheckConfig::new(algorithm)
        .with_strict_emptiness(args.strict_emptiness)
        .with_max_steps(args.max_steps);
    info!("checking with {}", config.algorithm);

    let time_total = std::time::Instant::now();
    let verdict = if args.equivalence {
        check_equivalence(&smaller, &bigger, &config)?
    } else {
        check_inclusion(&smaller, &bigger, &config)?
    };
    let time_total = time_total.elapsed();

    let relation = if args.equivalence { "L(smaller) = L(bigger)" } else { "L(smaller) ⊆ L(bigger)" };
    println!("{}: {}", relation, verdict);
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
