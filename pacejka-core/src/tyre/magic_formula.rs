//! The Magic Formula curve in the two textbook shapes used by the coefficient
//! schemas.
//!
//! # Equations used
//! full form:  y = D sin(C atan(B x - E (B x - atan(B x))))  
//! warped form: y = D sin(C atan(B phi)), with  
//! phi = (1 - E) x + (E / B) atan(B x)
//!
//! Every function here is element-wise with no dependency between samples, so
//! the array forms are plain `mapv` transforms.

use crate::imports::*;

/// Full Magic Formula, used by the simple coefficient schema.
///
/// # Arguments
/// * `x` - slip (ratio or angle in radians)
/// * `b` - stiffness factor
/// * `c` - shape factor
/// * `d` - peak value
/// * `e` - curvature factor
pub fn magic_formula(x: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
    let bx = b * x;
    d * (c * (bx - e * (bx - bx.atan())).atan()).sin()
}

/// Simplified Magic Formula evaluated at a pre-warped argument, used by the
/// Bakker coefficient schema.
pub fn magic_formula_warped(phi: f64, b: f64, c: f64, d: f64) -> f64 {
    d * (c * (b * phi).atan()).sin()
}

/// Curvature warp applied to the slip before [magic_formula_warped].
pub fn warp(x: f64, b: f64, e: f64) -> f64 {
    (1.0 - e) * x + (e / b) * (b * x).atan()
}

/// [magic_formula] over every element of `xs`
pub fn magic_formula_arr(xs: ArrayView1<f64>, b: f64, c: f64, d: f64, e: f64) -> Array1<f64> {
    xs.mapv(|x| magic_formula(x, b, c, d, e))
}

/// [warp] followed by [magic_formula_warped] over every element of `xs`
pub fn magic_formula_warped_arr(
    xs: ArrayView1<f64>,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
) -> Array1<f64> {
    xs.mapv(|x| magic_formula_warped(warp(x, b, e), b, c, d))
}
