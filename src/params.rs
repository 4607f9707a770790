//! Design parameters for a solar mounting structure
//!
//! Parameters arrive from the dashboard as a flat map of plain numbers.
//! Field names follow the dashboard keys; the short keys of the original
//! form (`col_len`, `raf_wid`, `blk_heigth`, ...) are accepted as aliases.

use std::collections::HashMap;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// Validated scalar inputs for one structure and its array copies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    // Panel
    pub panel_length: f64,
    pub panel_width: f64,
    pub panel_thickness: f64,

    /// Tilt angle from horizontal, in degrees
    #[serde(alias = "tilt_angle")]
    pub angle: f64,
    #[serde(deserialize_with = "count")]
    pub rows: usize,
    #[serde(deserialize_with = "count")]
    pub cols: usize,

    /// Support columns along the width (X)
    #[serde(alias = "x_cols", deserialize_with = "count")]
    pub columns_x: usize,
    /// Support columns along the slope (Y)
    #[serde(alias = "y_cols", deserialize_with = "count")]
    pub columns_y: usize,
    #[serde(alias = "col_min_height")]
    pub column_min_height: f64,

    // Gaps between panels
    pub h_gap: f64,
    pub v_gap: f64,

    // Offsets and overhangs
    pub front_offset: f64,
    pub rear_offset: f64,
    pub purlin_offset: f64,
    pub rafter_purlin_offset: f64,
    pub hor_panel_overhang: f64,
    pub hor_purlin_overhang: f64,

    // C-section dimensions: length is the profile depth, width the flange
    #[serde(alias = "col_len")]
    pub column_length: f64,
    #[serde(alias = "col_wid")]
    pub column_width: f64,
    #[serde(alias = "col_thk")]
    pub column_thickness: f64,
    #[serde(alias = "raf_len")]
    pub rafter_length: f64,
    #[serde(alias = "raf_wid")]
    pub rafter_width: f64,
    #[serde(alias = "raf_thk")]
    pub rafter_thickness: f64,
    #[serde(alias = "pur_len")]
    pub purlin_length: f64,
    #[serde(alias = "pur_wid")]
    pub purlin_width: f64,
    #[serde(alias = "pur_thk")]
    pub purlin_thickness: f64,

    // Array of structure copies
    #[serde(deserialize_with = "count")]
    pub copies_in_x: usize,
    pub x_gap: f64,
    #[serde(deserialize_with = "count")]
    pub copies_in_y: usize,
    pub y_gap: f64,

    // Ground blocks
    #[serde(alias = "blk_len")]
    pub block_length: f64,
    #[serde(alias = "blk_wid")]
    pub block_width: f64,
    #[serde(alias = "blk_heigth", alias = "blk_height")]
    pub block_height: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            panel_length: 1.7,
            panel_width: 1.0,
            panel_thickness: 0.04,
            angle: 30.0,
            rows: 2,
            cols: 3,
            columns_x: 2,
            columns_y: 2,
            column_min_height: 2.0,
            h_gap: 0.02,
            v_gap: 0.02,
            front_offset: 0.3,
            rear_offset: 0.3,
            purlin_offset: 0.3,
            rafter_purlin_offset: 0.2,
            hor_panel_overhang: 0.2,
            hor_purlin_overhang: 0.2,
            column_length: 0.15,
            column_width: 0.15,
            column_thickness: 0.01,
            rafter_length: 0.15,
            rafter_width: 0.15,
            rafter_thickness: 0.01,
            purlin_length: 0.15,
            purlin_width: 0.15,
            purlin_thickness: 0.01,
            copies_in_x: 1,
            x_gap: 20.0,
            copies_in_y: 1,
            y_gap: 20.0,
            block_length: 1.0,
            block_width: 1.0,
            block_height: 1.0,
        }
    }
}

/// Counts arrive as plain numbers; truncate like the dashboard does.
fn count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 {
        return Err(de::Error::custom(format!(
            "count must be a non-negative number, got {}",
            value
        )));
    }
    Ok(value.trunc() as usize)
}

impl ParameterSet {
    /// Build from a flat map of named numbers. Missing keys keep their defaults.
    pub fn from_map(map: &HashMap<String, f64>) -> LayoutResult<Self> {
        let value = serde_json::to_value(map)?;
        let params: Self = serde_json::from_value(value)?;
        params.validate()?;
        Ok(params)
    }

    /// Build from a flat JSON object of named numbers.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Tilt angle in radians
    pub fn angle_rad(&self) -> f64 {
        self.angle.to_radians()
    }

    /// Total number of array copies
    pub fn copies(&self) -> usize {
        self.copies_in_x * self.copies_in_y
    }

    /// Check every scalar is in range.
    pub fn validate(&self) -> LayoutResult<()> {
        let positive = [
            ("panel_length", self.panel_length),
            ("panel_width", self.panel_width),
            ("panel_thickness", self.panel_thickness),
            ("column_min_height", self.column_min_height),
            ("column_length", self.column_length),
            ("column_width", self.column_width),
            ("column_thickness", self.column_thickness),
            ("rafter_length", self.rafter_length),
            ("rafter_width", self.rafter_width),
            ("rafter_thickness", self.rafter_thickness),
            ("purlin_length", self.purlin_length),
            ("purlin_width", self.purlin_width),
            ("purlin_thickness", self.purlin_thickness),
            ("block_length", self.block_length),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(LayoutError::configuration(name, value, "must be positive"));
            }
        }

        let non_negative = [
            ("h_gap", self.h_gap),
            ("v_gap", self.v_gap),
            ("front_offset", self.front_offset),
            ("rear_offset", self.rear_offset),
            ("purlin_offset", self.purlin_offset),
            ("rafter_purlin_offset", self.rafter_purlin_offset),
            ("hor_panel_overhang", self.hor_panel_overhang),
            ("hor_purlin_overhang", self.hor_purlin_overhang),
            ("x_gap", self.x_gap),
            ("y_gap", self.y_gap),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(LayoutError::configuration(name, value, "must not be negative"));
            }
        }

        let counts = [
            ("rows", self.rows),
            ("cols", self.cols),
            ("columns_x", self.columns_x),
            ("columns_y", self.columns_y),
            ("copies_in_x", self.copies_in_x),
            ("copies_in_y", self.copies_in_y),
        ];
        for (name, value) in counts {
            if value < 1 {
                return Err(LayoutError::configuration(name, value as f64, "must be at least 1"));
            }
        }

        // A C-profile needs room for its web between the flanges
        let profiles = [
            ("column_thickness", self.column_thickness, self.column_length, self.column_width),
            ("rafter_thickness", self.rafter_thickness, self.rafter_length, self.rafter_width),
            ("purlin_thickness", self.purlin_thickness, self.purlin_length, self.purlin_width),
        ];
        for (name, t, l, w) in profiles {
            if 2.0 * t >= l || t >= w {
                return Err(LayoutError::configuration(
                    name,
                    t,
                    "wall too thick for the channel profile",
                ));
            }
        }

        if !(0.0..90.0).contains(&self.angle) {
            return Err(LayoutError::configuration(
                "angle",
                self.angle,
                "tilt must lie in [0, 90) degrees",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ParameterSet::default().validate().is_ok());
    }

    #[test]
    fn test_dashboard_keys() {
        let json = r#"{
            "x_cols": 3, "y_cols": 1, "col_min_height": 1.5,
            "raf_wid": 0.2, "blk_heigth": 0.8, "rows": 4.0
        }"#;
        let params = ParameterSet::from_json(json).unwrap();
        assert_eq!(params.columns_x, 3);
        assert_eq!(params.columns_y, 1);
        assert_eq!(params.column_min_height, 1.5);
        assert_eq!(params.rafter_width, 0.2);
        assert_eq!(params.block_height, 0.8);
        assert_eq!(params.rows, 4);
        assert_eq!(params.cols, 3);
    }

    #[test]
    fn test_from_map() {
        let mut map = HashMap::new();
        map.insert("angle".to_string(), 15.0);
        map.insert("copies_in_x".to_string(), 2.0);
        let params = ParameterSet::from_map(&map).unwrap();
        assert_eq!(params.angle, 15.0);
        assert_eq!(params.copies_in_x, 2);
        assert_eq!(params.copies(), 2);
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = ParameterSet::from_json(r#"{"rows": -1}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Parameters(_)));
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = ParameterSet::from_json(r#"{"cols": 0}"#).unwrap_err();
        match err {
            LayoutError::Configuration { quantity, .. } => assert_eq!(quantity, "cols"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_non_positive_length_rejected() {
        let params = ParameterSet {
            panel_width: 0.0,
            ..ParameterSet::default()
        };
        assert!(matches!(
            params.validate(),
            Err(LayoutError::Configuration { .. })
        ));
    }

    #[test]
    fn test_vertical_tilt_rejected() {
        let params = ParameterSet {
            angle: 90.0,
            ..ParameterSet::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_thick_wall_rejected() {
        let params = ParameterSet {
            purlin_thickness: 0.08,
            ..ParameterSet::default()
        };
        assert!(params.validate().is_err());
    }
}
