//! Material properties

use serde::{Deserialize, Serialize};

/// Material properties for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity
    pub e: f64,
    /// Shear modulus
    pub g: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Density
    pub rho: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, g: f64, nu: f64, rho: f64) -> Self {
        Self { e, g, nu, rho }
    }

    /// Create a new isotropic material from E and nu
    /// G is calculated as E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64, rho: f64) -> Self {
        let g = e / (2.0 * (1.0 + nu));
        Self::new(e, g, nu, rho)
    }

    /// Structural steel in kip/inch units (E in ksi, rho in kci)
    pub fn steel_kip_inch() -> Self {
        Self::isotropic(29_000.0, 0.3, 0.49 / 12f64.powi(3))
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel_kip_inch()
    }
}
