//! Parity Sampling Demo
//!
//! Compares a classical parity count over every input with parity tallies
//! drawn from a superposed register.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use console::style;

use qreg_demos::export::export_to_dir;
use qreg_demos::parity::{
    SWEEP_SIZE, all_bitstrings, classical_parity, quantum_parity, scaling_sweep,
};
use qreg_demos::{
    DemoConfig, create_progress_bar, init_logging, print_header, print_info, print_result,
    print_section, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-parity")]
#[command(about = "Compare classical and sampled parity checking")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of shots (overrides config)
    #[arg(short = 'n', long)]
    shots: Option<usize>,

    /// RNG seed (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write CSV/JSON exports into this directory
    #[arg(short, long)]
    export: Option<PathBuf>,

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
    if let Some(shots) = args.shots {
        config.shots = shots;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.export.is_some() {
        config.output_dir = args.export;
    }
    config.validate().context("invalid configuration")?;
    init_logging(args.verbose, &config.log_level);

    print_header("Parity Sampling Demo");

    let initial = config.initial_register()?;
    let n = initial.num_qubits();

    print_section("Initial State");
    print_result("Qubits", n);
    println!("  {initial}");
    for (bits, amp) in initial.describe() {
        print_result(&format!("P({bits})"), format!("{:.4}", amp.norm_sqr()));
    }

    print_section("Classical Parity");
    let inputs = all_bitstrings(n);
    let classical = classical_parity(&inputs);
    print_result("Inputs", inputs.len());
    print_result("Even", classical.tally.even);
    print_result("Odd", classical.tally.odd);
    print_result("Time", format!("{} µs", classical.elapsed.as_micros()));

    print_section("Quantum Sampling");
    let mut rng = config.rng();
    let pb = create_progress_bar(config.shots as u64, "sampling");
    let quantum = quantum_parity(&initial, config.shots, &mut rng, |_| pb.inc(1))?;
    pb.finish_and_clear();

    println!("  {}", quantum.superposition);
    print_result("Shots", config.shots);
    print_result("Even", quantum.tally.even);
    print_result("Odd", quantum.tally.odd);
    print_result("Time", format!("{} µs", quantum.elapsed.as_micros()));

    print_section("Observed Frequencies");
    for (bits, count) in quantum.counts.iter() {
        print_result(
            bits,
            format!("{count:>6}  ({:.2}%)", 100.0 * quantum.counts.frequency(bits)),
        );
    }
    if let Some((bits, count)) = quantum.counts.most_frequent() {
        print_info(&format!("Most frequent: {bits} ({count} shots)"));
    }

    if let Some(dir) = &config.output_dir {
        print_section("Export");
        let rows = scaling_sweep(&initial, &inputs, SWEEP_SIZE, &mut rng)?;
        print_info(&format!("Timed input sizes 1..={SWEEP_SIZE} for both methods"));
        let written = export_to_dir(dir, &quantum.records, &rows, &quantum.counts)
            .with_context(|| format!("exporting to {}", dir.display()))?;
        for path in written {
            print_success(&format!("Wrote {}", path.display()));
        }
    }

    println!();
    print_success("Parity demo complete");
    Ok(())
}
