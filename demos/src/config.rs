//! Demo configuration.
//!
//! Precedence, lowest first: built-in defaults, an optional YAML file,
//! `QREG_*` environment variables, then command-line flags applied by the
//! binaries.
//!
//! ```yaml
//! seed: 42
//! shots: 2048
//! log_level: info
//! output_dir: ./out
//! initial_state:
//!   "000": [0.7, 0.0]
//!   "011": [0.5, 0.6]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qreg_core::{Complex64, Register};

use crate::error::{DemoError, DemoResult};

fn default_shots() -> usize {
    1024
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// The mixed three-qubit state used by the parity demo.
fn default_initial_state() -> BTreeMap<String, [f64; 2]> {
    [
        ("000", [0.7, 0.0]),
        ("001", [0.1, 0.0]),
        ("010", [0.2, 0.0]),
        ("011", [0.5, 0.6]),
        ("100", [0.3, 0.0]),
        ("101", [0.5, 0.8]),
        ("110", [0.5, 0.9]),
        ("111", [0.0, 0.1]),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Settings shared by the demo binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// RNG seed; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of measurement shots.
    #[serde(default = "default_shots")]
    pub shots: usize,

    /// Log filter used when no `-v` flag is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for CSV/JSON exports; nothing is written when absent.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Initial amplitudes as bitstring → `[re, im]`; normalized on use.
    #[serde(default = "default_initial_state")]
    pub initial_state: BTreeMap<String, [f64; 2]>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: None,
            shots: default_shots(),
            log_level: default_log_level(),
            output_dir: None,
            initial_state: default_initial_state(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DemoResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Values are not validated here; a later layer may still override them.
    pub fn from_yaml_str(contents: &str) -> DemoResult<Self> {
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Load with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    ///
    /// Callers apply command-line flags on top and then call
    /// [`DemoConfig::validate`].
    pub fn load(config_file: Option<&Path>) -> DemoResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env_from(|key| std::env::var(key).ok());
        debug!(?config, "loaded demo configuration");
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Recognised keys: `QREG_SEED`, `QREG_SHOTS`, `QREG_LOG_LEVEL`,
    /// `QREG_OUTPUT_DIR`. Unparseable numbers are ignored.
    pub fn merge_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QREG_SEED") {
            if let Ok(seed) = v.parse() {
                self.seed = Some(seed);
            }
        }
        if let Some(v) = lookup("QREG_SHOTS") {
            if let Ok(shots) = v.parse() {
                self.shots = shots;
            }
        }
        if let Some(v) = lookup("QREG_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("QREG_OUTPUT_DIR") {
            self.output_dir = Some(PathBuf::from(v));
        }
        self
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> DemoResult<()> {
        if self.shots == 0 {
            return Err(DemoError::InvalidConfig(
                "shots must be at least 1".to_string(),
            ));
        }
        self.num_qubits().map(|_| ())
    }

    /// Register width implied by the `initial_state` keys.
    pub fn num_qubits(&self) -> DemoResult<usize> {
        let mut keys = self.initial_state.keys();
        let first = keys
            .next()
            .ok_or_else(|| DemoError::InvalidConfig("initial_state is empty".to_string()))?;
        let width = first.chars().count();
        if let Some(other) = keys.find(|k| k.chars().count() != width) {
            return Err(DemoError::InvalidConfig(format!(
                "initial_state keys differ in length: '{first}' vs '{other}'"
            )));
        }
        Ok(width)
    }

    /// Build the configured initial register.
    pub fn initial_register(&self) -> DemoResult<Register> {
        let n = self.num_qubits()?;
        let entries = self
            .initial_state
            .iter()
            .map(|(k, [re, im])| (k.as_str(), Complex64::new(*re, *im)));
        Ok(Register::with_amplitudes(n, entries)?)
    }

    /// Random number generator for this run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
