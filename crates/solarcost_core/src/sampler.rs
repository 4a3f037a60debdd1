//! Asymmetric log-normal sampling for cost and yield parameters
//!
//! Cost-database entries carry a nominal estimate plus low/high bounds that
//! are read as the ~10th and ~90th percentiles of the parameter's
//! distribution. Draws come from a two-piece log-normal: the upper and lower
//! halves of a standard normal are stretched independently so the bounds land
//! at the 1.28 sigma points.

use rand::Rng;
use rand_distr::StandardNormal;

/// z-score at which the low/high bounds sit (~10th/90th percentile).
pub const BOUND_Z: f64 = 1.28;

/// Draw one value from the two-piece log-normal defined by
/// `(nominal, low, high)`.
///
/// A positive standard-normal draw is scaled by `ln(high/nominal) / 1.28`,
/// a negative draw by `ln(nominal/low) / 1.28`, so the distribution's median
/// is the nominal value and roughly 80% of draws fall inside `[low, high]`.
///
/// Degenerate inputs never panic: a zero nominal always yields zero (log of
/// zero is unrepresentable), and a zero or sign-flipped bound collapses that
/// side of the distribution to the nominal value.
pub fn two_piece_lognormal<R: Rng + ?Sized>(
    rng: &mut R,
    nominal: f64,
    low: f64,
    high: f64,
) -> f64 {
    if nominal == 0.0 {
        return 0.0;
    }

    let z: f64 = rng.sample(StandardNormal);
    let ratio = if z > 0.0 { high / nominal } else { nominal / low };

    // low == 0 or a bound on the wrong side of zero: no spread on this side.
    if !ratio.is_finite() || ratio <= 0.0 {
        return nominal;
    }

    nominal * (z * ratio.ln() / BOUND_Z).exp()
}
