//! Species data for the built-in mechanisms.

use rf_core::units::constants::{ONE_ATM_PA, T_REF_K};

/// Temperature at which reference transport data is tabulated [K].
const T_TRANSPORT_REF_K: f64 = 300.0;

/// Two-term molar heat capacity fit `cp = a + b·T` [J/(kmol·K)].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCapacityFit {
    pub a: f64,
    pub b: f64,
}

/// Thermodynamic and transport data for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesData {
    pub name: String,
    /// Molecular weight [kg/kmol]
    pub molar_mass: f64,
    /// Enthalpy of formation at 298.15 K [J/kmol]
    pub enthalpy_formation: f64,
    pub cp_fit: HeatCapacityFit,
    /// Viscosity at 300 K [Pa·s]
    pub viscosity_ref: f64,
    /// Diffusivity into the mixture at 300 K and 1 atm [m²/s]
    pub diffusivity_ref: f64,
}

impl SpeciesData {
    /// Molar heat capacity [J/(kmol·K)].
    pub fn cp_molar(&self, t: f64) -> f64 {
        self.cp_fit.a + self.cp_fit.b * t
    }

    /// Molar enthalpy [J/kmol], integrated from the formation enthalpy.
    pub fn enthalpy_molar(&self, t: f64) -> f64 {
        let HeatCapacityFit { a, b } = self.cp_fit;
        self.enthalpy_formation + a * (t - T_REF_K) + 0.5 * b * (t * t - T_REF_K * T_REF_K)
    }

    /// Power-law viscosity [Pa·s].
    pub fn viscosity(&self, t: f64) -> f64 {
        self.viscosity_ref * (t / T_TRANSPORT_REF_K).powf(0.7)
    }

    /// Diffusivity scaled to (T, P) [m²/s].
    pub fn diffusivity(&self, t: f64, p: f64) -> f64 {
        self.diffusivity_ref * (t / T_TRANSPORT_REF_K).powf(1.75) * (ONE_ATM_PA / p)
    }
}

/// Species available to the built-in mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Generic fuel of the single-step model
    Fuel,
    /// Generic product of the single-step model
    Product,
    /// Methane (CH₄)
    CH4,
    /// Oxygen (O₂)
    O2,
    /// Nitrogen (N₂)
    N2,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Water vapour (H₂O)
    H2O,
}

impl Species {
    pub const ALL: [Species; 7] = [
        Species::Fuel,
        Species::Product,
        Species::CH4,
        Species::O2,
        Species::N2,
        Species::CO2,
        Species::H2O,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::Fuel => "FUEL",
            Species::Product => "PROD",
            Species::CH4 => "CH4",
            Species::O2 => "O2",
            Species::N2 => "N2",
            Species::CO2 => "CO2",
            Species::H2O => "H2O",
        }
    }

    /// Get molar mass [kg/kmol] for this species.
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::Fuel => 29.0,
            Species::Product => 29.0,
            Species::CH4 => 16.043,
            Species::O2 => 31.999,
            Species::N2 => 28.014,
            Species::CO2 => 44.010,
            Species::H2O => 18.015,
        }
    }

    /// Full data record for mechanism assembly.
    pub fn data(&self) -> SpeciesData {
        let (enthalpy_formation, a, b, viscosity_ref, diffusivity_ref) = match self {
            Species::Fuel => (-2.0e7, 29_000.0, 8.0, 1.7e-5, 1.8e-5),
            Species::Product => (-1.2e8, 30_000.0, 7.0, 1.8e-5, 1.9e-5),
            Species::CH4 => (-7.485e7, 14_000.0, 50.0, 1.1e-5, 2.2e-5),
            Species::O2 => (0.0, 28_000.0, 5.0, 2.07e-5, 2.0e-5),
            Species::N2 => (0.0, 27_500.0, 4.5, 1.78e-5, 2.0e-5),
            Species::CO2 => (-3.935e8, 32_000.0, 17.0, 1.5e-5, 1.6e-5),
            Species::H2O => (-2.418e8, 30_000.0, 9.0, 1.0e-5, 2.5e-5),
        };
        SpeciesData {
            name: self.key().to_string(),
            molar_mass: self.molar_mass(),
            enthalpy_formation,
            cp_fit: HeatCapacityFit { a, b },
            viscosity_ref,
            diffusivity_ref,
        }
    }
}
