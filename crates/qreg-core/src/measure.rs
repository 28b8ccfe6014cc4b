//! Born-rule sampling and measurement histograms.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Pick an outcome index from a probability distribution (CDF method).
///
/// Returns the smallest `i` with `r < Σ_{k≤i} p_k`. If rounding leaves `r`
/// at or above the final cumulative sum, the last index is returned even
/// when its own probability is zero; callers that collapse onto the result
/// may therefore land on a basis state with `|a|² = 0` in that rare case.
/// `probabilities` must be non-empty.
pub fn sample_index<I>(probabilities: I, r: f64) -> usize
where
    I: IntoIterator<Item = f64>,
{
    let mut cumulative = 0.0;
    let mut last = 0;
    for (i, p) in probabilities.into_iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
        last = i;
    }
    last
}

/// Draw a uniform value in `[0, 1)` and sample an index with it.
pub fn sample_with<R, I>(probabilities: I, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = f64>,
{
    let r: f64 = rng.r#gen();
    sample_index(probabilities, r)
}

/// Big-endian bitstring of `index` padded to `width` characters.
#[inline]
pub fn index_to_bitstring(index: usize, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    format!("{index:0width$b}")
}

/// Histogram of measurement outcomes keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: BTreeMap<String, u64>,
    shots: u64,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `n` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, n: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += n;
        self.shots += n;
    }

    /// Number of times `bitstring` was observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Empirical frequency of `bitstring`, or `0.0` for an empty histogram.
    pub fn frequency(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / self.shots as f64
    }

    /// The most frequent outcome; ties resolve to the smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (k, &v) in &self.counts {
            match best {
                Some((_, bv)) if bv >= v => {}
                _ => best = Some((k.as_str(), v)),
            }
        }
        best
    }

    /// Iterate over `(bitstring, count)` in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<S> for Counts {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for outcome in iter {
            counts.insert(outcome, 1);
        }
        counts
    }
}
