//! CSV and JSON exports for the parity demo.
//!
//! Files written by [`export_to_dir`]:
//!
//! | file | contents |
//! |------|----------|
//! | `quantum_measurements_detailed.csv` | one row per shot |
//! | `parity_comparison_analysis.csv` | classical vs quantum timings per input size |
//! | `collapse_measurements.csv` | outcome frequencies |
//! | `counts.json` | outcome frequencies |

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use qreg_core::Counts;

use crate::error::DemoResult;
use crate::parity::Parity;

/// File name of the per-shot CSV.
pub const MEASUREMENTS_FILE: &str = "quantum_measurements_detailed.csv";
/// File name of the timing comparison CSV.
pub const COMPARISON_FILE: &str = "parity_comparison_analysis.csv";
/// File name of the counts CSV.
pub const COUNTS_CSV_FILE: &str = "collapse_measurements.csv";
/// File name of the counts JSON.
pub const COUNTS_FILE: &str = "counts.json";

/// One sampled shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// 1-based shot number.
    pub measurement: usize,
    /// Observed bitstring.
    pub state: String,
    /// Number of ones in `state`.
    pub ones: usize,
    /// Parity of `state`.
    pub parity: Parity,
    /// Born probability of `state` before the shot.
    pub probability: f64,
}

/// How a parity pass is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    /// Walk every input in turn.
    Classical,
    /// Sample a superposed register.
    Quantum,
}

impl Method {
    /// Cost per pass in terms of the input size.
    pub fn complexity(self) -> &'static str {
        match self {
            Method::Classical => "O(n)",
            Method::Quantum => "O(1)",
        }
    }

    /// How inputs are visited.
    pub fn parallelism(self) -> &'static str {
        match self {
            Method::Classical => "Sequential",
            Method::Quantum => "Parallel",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Classical => f.write_str("Classical"),
            Method::Quantum => f.write_str("Quantum"),
        }
    }
}

/// One timing row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Method that produced the timing.
    pub method: Method,
    /// Input size of the pass.
    pub input_size: usize,
    /// Elapsed time in microseconds.
    pub time_microseconds: u128,
}

/// Write per-shot records as CSV.
pub fn write_measurements_csv<W: Write>(mut out: W, records: &[MeasurementRecord]) -> DemoResult<()> {
    writeln!(out, "Measurement,State,Ones,Parity,Probability")?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{:.6}",
            r.measurement, r.state, r.ones, r.parity, r.probability
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Write timing rows as CSV.
pub fn write_comparison_csv<W: Write>(mut out: W, rows: &[ComparisonRow]) -> DemoResult<()> {
    writeln!(out, "Method,Input_Size,Time_Microseconds,Complexity,Parallelism")?;
    for r in rows {
        writeln!(
            out,
            "{},{},{},{},{}",
            r.method,
            r.input_size,
            r.time_microseconds,
            r.method.complexity(),
            r.method.parallelism()
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Write counts as CSV, one row per observed bitstring in sorted order.
pub fn write_counts_csv<W: Write>(mut out: W, counts: &Counts) -> DemoResult<()> {
    writeln!(out, "Measurement,Count")?;
    for (bitstring, count) in counts.iter() {
        writeln!(out, "{bitstring},{count}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write counts as pretty JSON.
pub fn write_counts_json<W: Write>(mut out: W, counts: &Counts) -> DemoResult<()> {
    serde_json::to_writer_pretty(&mut out, counts)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write every export into `dir`, creating it if needed.
///
/// Returns the paths written.
pub fn export_to_dir(
    dir: &Path,
    records: &[MeasurementRecord],
    rows: &[ComparisonRow],
    counts: &Counts,
) -> DemoResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let measurements = dir.join(MEASUREMENTS_FILE);
    write_measurements_csv(BufWriter::new(File::create(&measurements)?), records)?;

    let comparison = dir.join(COMPARISON_FILE);
    write_comparison_csv(BufWriter::new(File::create(&comparison)?), rows)?;

    let counts_csv = dir.join(COUNTS_CSV_FILE);
    write_counts_csv(BufWriter::new(File::create(&counts_csv)?), counts)?;

    let counts_json = dir.join(COUNTS_FILE);
    write_counts_json(BufWriter::new(File::create(&counts_json)?), counts)?;

    info!(dir = %dir.display(), "exports written");
    Ok(vec![measurements, comparison, counts_csv, counts_json])
}
