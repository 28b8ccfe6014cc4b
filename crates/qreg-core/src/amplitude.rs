//! Operations on raw amplitude vectors.
//!
//! Everything above this module stores its state as a slice of
//! [`Complex64`]; the helpers here are the only place that rescales one.

use std::fmt;

use num_complex::Complex64;

use crate::error::{StateError, StateResult};

/// Default tolerance for the normalization invariant.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Amplitudes with a magnitude below this are treated as absent when printing.
pub const NEGLIGIBLE_AMPLITUDE: f64 = 1e-6;

/// Total probability `Σ |aᵢ|²` of a vector.
#[inline]
pub fn norm_sqr_sum(amplitudes: &[Complex64]) -> f64 {
    amplitudes.iter().map(Complex64::norm_sqr).sum()
}

/// Scale `amplitudes` in place so that `Σ |aᵢ|² = 1`.
///
/// Returns the squared norm the vector had before scaling. Fails with
/// [`StateError::DegenerateState`] when that norm is zero (or not finite),
/// leaving the vector untouched.
pub fn normalize(amplitudes: &mut [Complex64]) -> StateResult<f64> {
    let total = norm_sqr_sum(amplitudes);
    if total == 0.0 || !total.is_finite() {
        return Err(StateError::DegenerateState);
    }

    let scale = total.sqrt().recip();
    for amp in amplitudes.iter_mut() {
        *amp *= scale;
    }
    Ok(total)
}

/// Whether the vector satisfies the normalization invariant within `tolerance`.
#[inline]
pub fn is_normalized(amplitudes: &[Complex64], tolerance: f64) -> bool {
    (norm_sqr_sum(amplitudes) - 1.0).abs() <= tolerance
}

/// Inner product `⟨a|b⟩ = Σ conj(aᵢ)·bᵢ`.
pub fn inner_product(a: &[Complex64], b: &[Complex64]) -> StateResult<Complex64> {
    if a.len() != b.len() {
        return Err(StateError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x.conj() * y).sum())
}

/// Compact display adapter for a single amplitude.
///
/// Purely real or purely imaginary values drop the zero part, so
/// `0.7071+0i` prints as `0.7071` and `0-1i` as `-i`.
pub(crate) struct DisplayAmplitude(pub Complex64);

impl fmt::Display for DisplayAmplitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Complex64 { re, im } = self.0;
        let re_zero = re.abs() < NEGLIGIBLE_AMPLITUDE;
        let im_zero = im.abs() < NEGLIGIBLE_AMPLITUDE;

        match (re_zero, im_zero) {
            (true, true) => write!(f, "0"),
            (false, true) => write!(f, "{}", round4(re)),
            (true, false) => write_imaginary(f, im, false),
            (false, false) => {
                write!(f, "({}", round4(re))?;
                write_imaginary(f, im, true)?;
                write!(f, ")")
            }
        }
    }
}

/// Write `|ψ⟩ = a|l⟩ + b|m⟩ ...`, folding the sign of a purely real or
/// purely imaginary term into its separator. Prints `0` for no terms.
pub(crate) fn write_ket<L, I>(f: &mut fmt::Formatter<'_>, terms: I) -> fmt::Result
where
    L: fmt::Display,
    I: IntoIterator<Item = (L, Complex64)>,
{
    write!(f, "|ψ⟩ = ")?;
    let mut first = true;
    for (label, amp) in terms {
        if first {
            write!(f, "{}|{label}⟩", DisplayAmplitude(amp))?;
            first = false;
            continue;
        }
        let negative = if amp.im.abs() < NEGLIGIBLE_AMPLITUDE {
            amp.re < 0.0
        } else if amp.re.abs() < NEGLIGIBLE_AMPLITUDE {
            amp.im < 0.0
        } else {
            false
        };
        if negative {
            write!(f, " - {}|{label}⟩", DisplayAmplitude(-amp))?;
        } else {
            write!(f, " + {}|{label}⟩", DisplayAmplitude(amp))?;
        }
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}

fn write_imaginary(f: &mut fmt::Formatter<'_>, im: f64, signed: bool) -> fmt::Result {
    let sign = if im < 0.0 {
        "-"
    } else if signed {
        "+"
    } else {
        ""
    };
    let mag = im.abs();
    if (mag - 1.0).abs() < NEGLIGIBLE_AMPLITUDE {
        write!(f, "{sign}i")
    } else {
        write!(f, "{sign}{}i", round4(mag))
    }
}

fn round4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}
