//! Deutsch–Jozsa Demo
//!
//! Classifies oracles as constant or balanced with a single query.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use console::style;

use qreg_core::Oracle;
use qreg_demos::deutsch::{OracleKind, Verdict, run_deutsch_jozsa};
use qreg_demos::{
    DemoConfig, init_logging, print_header, print_info, print_result, print_section,
    print_success, print_warning,
};

/// Multi-input function families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Family {
    /// `f(x) = 0`
    Constant,
    /// XOR of all input bits
    Parity,
}

#[derive(Parser, Debug)]
#[command(name = "demo-deutsch")]
#[command(about = "Classify oracles with the Deutsch–Jozsa algorithm")]
struct Args {
    /// One-bit oracle to test (all four when omitted)
    #[arg(short, long, value_enum)]
    oracle: Option<OracleKind>,

    /// Also run Deutsch–Jozsa over this many input qubits
    #[arg(short = 'k', long)]
    inputs: Option<usize>,

    /// Function used with --inputs
    #[arg(long, value_enum, default_value = "parity")]
    family: Family,

    /// Runs per oracle
    #[arg(short, long, default_value = "1")]
    trials: usize,

    /// RNG seed (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = DemoConfig::load(args.config.as_deref()).context("loading configuration")?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("invalid configuration")?;
    init_logging(args.verbose, &config.log_level);
    let mut rng = config.rng();

    print_header("Deutsch–Jozsa Algorithm Demo");

    let kinds: Vec<OracleKind> = match args.oracle {
        Some(kind) => vec![kind],
        None => OracleKind::ALL.to_vec(),
    };

    print_section("One-bit Oracles");
    let mut correct = 0;
    let mut total = 0;
    for kind in kinds {
        let oracle = kind.oracle();
        for _ in 0..args.trials {
            let outcome = run_deutsch_jozsa(&oracle, &mut rng)?;
            let expected = if kind.is_constant() {
                Verdict::Constant
            } else {
                Verdict::Balanced
            };
            total += 1;
            if outcome.verdict == expected {
                correct += 1;
            }
            print_result(
                &format!("f = {kind}"),
                format!(
                    "measured {} → {} (p = {:.4})",
                    outcome.measured, outcome.verdict, outcome.confidence
                ),
            );
        }
    }

    if let Some(k) = args.inputs {
        print_section(&format!("{k}-input Oracle"));
        let oracle = match args.family {
            Family::Constant => Oracle::constant(k, false)?,
            Family::Parity => Oracle::parity(k)?,
        };
        print_info(&format!(
            "{} qubits, {} amplitudes",
            oracle.num_qubits(),
            1usize << oracle.num_qubits()
        ));
        for _ in 0..args.trials {
            let outcome = run_deutsch_jozsa(&oracle, &mut rng)?;
            let expected = if oracle.is_constant() {
                Verdict::Constant
            } else {
                Verdict::Balanced
            };
            total += 1;
            if outcome.verdict == expected {
                correct += 1;
            }
            print_result(
                "Outcome",
                format!("measured {} → {}", outcome.measured, outcome.verdict),
            );
        }
    }

    println!();
    if correct == total {
        print_success(&format!("{correct}/{total} oracles classified correctly"));
    } else {
        print_warning(&format!("{correct}/{total} oracles classified correctly"));
    }
    Ok(())
}
