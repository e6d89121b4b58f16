use crate::geometry::tolerance::{EPS_COLLINEAR, EPS_EQUAL_LEN, EPS_POS};
use serde::{Deserialize, Serialize};

/// Tunables for an editing session. Every field has a default so partial
/// JSON documents load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Fraction of the adjacent segment length given to synthesized handles.
    pub handle_ratio: f64,
    /// Sine of the largest angle still treated as a straight line through a node.
    pub collinear_tolerance: f64,
    /// Slack when comparing handle lengths.
    pub length_tolerance: f64,
    /// Endpoints closer than this are merged when paths are joined.
    pub coincide_tolerance: f64,
    /// Default hit radius in display units.
    pub pick_tolerance: f64,
}

impl Default for EditConfig {
    fn default() -> Self {
        EditConfig {
            handle_ratio: 1.0 / 3.0,
            collinear_tolerance: EPS_COLLINEAR,
            length_tolerance: EPS_EQUAL_LEN,
            coincide_tolerance: EPS_POS,
            pick_tolerance: 6.0,
        }
    }
}

impl EditConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EditConfig::from_json_str(r#"{ "handle_ratio": 0.25 }"#).unwrap();
        assert_eq!(cfg.handle_ratio, 0.25);
        assert_eq!(cfg.pick_tolerance, EditConfig::default().pick_tolerance);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(EditConfig::from_json_str(r#"{ "handle_ratio": "big" }"#).is_err());
    }
}
