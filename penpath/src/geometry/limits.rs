// Ingestion limits for outline strings handed in by the document model

pub const MAX_OUTLINE_LEN: usize = 8 * 1024 * 1024; // characters in the 'd' string
pub const MAX_COMMANDS: usize = 200_000;
pub const MAX_NODES: usize = 200_000;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }
