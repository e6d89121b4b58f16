// Centralized tolerances and helpers for handle and outline geometry

pub const EPS_POS: f64 = 1e-4;            // point coincidence threshold (path units)
pub const EPS_LEN: f64 = 1e-9;            // zero-length vector threshold
pub const EPS_DENOM: f64 = 1e-12;         // denominator guard for LS/ratios

// Link-type re-derivation on parse
pub const EPS_COLLINEAR: f64 = 1e-4;      // sine of the max deviation from a straight line
pub const EPS_EQUAL_LEN: f64 = 1e-4;      // handle length equality slack

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }
