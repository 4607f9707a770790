//! Section properties for frame elements

use serde::{Deserialize, Serialize};

/// Cross-section properties for frame elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area
    pub a: f64,
    /// Moment of inertia about local y-axis
    pub iy: f64,
    /// Moment of inertia about local z-axis
    pub iz: f64,
    /// Torsional constant
    pub j: f64,
}

impl Section {
    /// Create a new section with basic properties
    pub fn new(a: f64, iy: f64, iz: f64, j: f64) -> Self {
        Self { a, iy, iz, j }
    }

    /// Placeholder frame section (in², in⁴) used until a section is sized
    pub fn default_frame() -> Self {
        Self::new(10.3, 15.3, 510.0, 0.506)
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::default_frame()
    }
}
