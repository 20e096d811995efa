//! Module containing the vehicle load model.

use crate::imports::*;
use crate::params::*;

/// Vehicle reduced to what the tyre model needs: its mass, spread evenly
/// over four wheels under static gravity load.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VehicleModel {
    /// Vehicle mass, kg
    mass_kg: f64,
}

impl SerdeAPI for VehicleModel {
    fn init(&mut self) -> anyhow::Result<()> {
        Self::check_mass(self.mass_kg)
    }
}

impl VehicleModel {
    pub fn new(mass_kg: f64) -> anyhow::Result<Self> {
        Self::check_mass(mass_kg)?;
        Ok(Self { mass_kg })
    }

    fn check_mass(mass_kg: f64) -> anyhow::Result<()> {
        if !(mass_kg.is_finite() && mass_kg > 0.0) {
            bail!(TyreError::InvalidInput(format!(
                "vehicle mass must be positive and finite, got {mass_kg} kg"
            )));
        }
        Ok(())
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    /// Total vehicle weight, N
    pub fn total_weight(&self) -> f64 {
        self.mass_kg * GRAVITY_MPS2
    }

    /// Static vertical load per wheel, N
    pub fn wheel_load(&self) -> f64 {
        self.total_weight() / WHEEL_COUNT
    }
}
