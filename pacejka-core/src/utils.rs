//! Module containing miscellaneous utility functions.

use crate::imports::*;
use crate::params::AXIS_LIMIT;

/// return max <f64> of the absolute finite values of arr, NaN if there are none
pub fn ndarrmaxabs(arr: &Array1<f64>) -> f64 {
    arr.iter()
        .copied()
        .filter(|x| x.is_finite())
        .map(f64::abs)
        .fold(f64::NAN, f64::max)
}

/// true if every element of arr is finite
pub fn ndarrallfinite(arr: &Array1<f64>) -> bool {
    arr.iter().all(|x| x.is_finite())
}

/// true if each element of arr is strictly greater than the one before it
pub fn ndarrstrictlyincreasing(arr: &Array1<f64>) -> bool {
    arr.iter().zip(arr.iter().skip(1)).all(|(a, b)| b > a)
}

/// Return (min, max) over the finite values produced by `vals`, or None if
/// there are none.
pub fn finite_min_max<I>(vals: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    vals.into_iter()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// true if `x` is finite and small enough to sit on a chart axis
pub fn is_plottable(x: f64) -> bool {
    x.is_finite() && x.abs() <= AXIS_LIMIT
}

/// Widen a degenerate or empty range so that it can be used as a chart axis.
/// Bounds are clamped to [-AXIS_LIMIT, AXIS_LIMIT] so the span stays finite.
pub fn padded_range(range: Option<(f64, f64)>) -> (f64, f64) {
    let clamp = |v: f64| v.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    match range {
        None => (-1.0, 1.0),
        Some((lo, hi)) => {
            let (lo, hi) = (clamp(lo), clamp(hi));
            let pad = if (hi - lo).abs() < f64::EPSILON * lo.abs().max(1.0) {
                (lo.abs() * 0.05).max(1.0)
            } else {
                // scaled before subtracting, hi - lo overflows near f64::MAX
                0.05 * hi - 0.05 * lo
            };
            (clamp(lo - pad), clamp(hi + pad))
        }
    }
}
