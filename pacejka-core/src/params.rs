//! Module containing model constants and defaults.

/// Gravitational acceleration used for static wheel loads
pub const GRAVITY_MPS2: f64 = 9.81;
/// Static load is split evenly over this many wheels
pub const WHEEL_COUNT: f64 = 4.0;
/// Newtons per kilonewton, Bakker coefficients take vertical load in kN
pub const N_PER_KN: f64 = 1_000.0;

/// Number of slip ratio samples in the default sweep
pub const DEFAULT_SWEEP_POINTS: usize = 200;
/// Friction coefficient used by the simple coefficient schema unless overridden
pub const DEFAULT_MU: f64 = 1.0;

/// Default directory for rendered charts
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// Chart size in pixels: 6.4 x 4.8 in at 150 dpi
pub const FIGURE_SIZE_PX: (u32, u32) = (960, 720);
/// Largest |value| placed on a chart axis; larger forces are left out
pub const AXIS_LIMIT: f64 = 1e300;
pub const LONGITUDINAL_FORCE_FILE: &str = "longitudinal_force.png";
pub const LATERAL_FORCE_FILE: &str = "lateral_force.png";
