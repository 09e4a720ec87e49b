//! Per-point closure state: thermodynamics, transport and chemistry.
//!
//! Every state-set call overwrites these values wholesale; nothing from a
//! previous mesh point survives except the buffer allocations.

use rf_core::units::{Density, DynVisc, Pressure, Temperature, k, kg_per_m3, pa_s};

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Specific heat capacity [J/(kg·K)].
pub type SpecHeatCapacity = f64;

/// Thermal conductivity [W/(m·K)].
pub type ThermalConductivity = f64;

/// Mass diffusivity [m²/s].
pub type MassDiffusivity = f64;

/// Thermodynamic scalars at the last evaluated point.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermodynamicState {
    /// Temperature [K]
    pub temperature: Temperature,

    /// Operating pressure [Pa], constant for the simulation
    pub pressure: Pressure,

    /// Density [kg/m³]
    pub density: Density,

    /// Specific enthalpy [J/kg]
    pub enthalpy: SpecEnthalpy,

    /// Specific heat capacity at constant pressure [J/(kg·K)]
    pub cp: SpecHeatCapacity,

    /// Specific heat capacity at constant volume [J/(kg·K)]
    pub cv: SpecHeatCapacity,
}

impl ThermodynamicState {
    /// State before the first evaluation: only the pressure is known.
    pub fn unset(pressure: Pressure) -> Self {
        Self {
            temperature: k(0.0),
            pressure,
            density: kg_per_m3(0.0),
            enthalpy: 0.0,
            cp: 0.0,
            cv: 0.0,
        }
    }

    /// Whether a state-set call has populated this state.
    pub fn is_set(&self) -> bool {
        self.temperature.value > 0.0
    }

    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        format!(
            "Thermo(T={:.2}K,P={:.0}Pa,ρ={:.4}kg/m³,h={:.1}J/kg,cp={:.2}J/kg·K,cv={:.2}J/kg·K)",
            self.temperature.value,
            self.pressure.value,
            self.density.value,
            self.enthalpy,
            self.cp,
            self.cv
        )
    }
}

/// Transport properties at the last evaluated point.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportState {
    /// Dynamic viscosity [Pa·s]
    pub viscosity: DynVisc,

    /// Thermal conductivity [W/(m·K)]
    pub conductivity: ThermalConductivity,

    /// Mass diffusivity per tracked species [m²/s]
    pub mass_diffusivity: Vec<MassDiffusivity>,
}

impl TransportState {
    pub fn unset(n_species: usize) -> Self {
        Self {
            viscosity: pa_s(0.0),
            conductivity: 0.0,
            mass_diffusivity: vec![0.0; n_species],
        }
    }
}

/// Chemical production terms at the last evaluated point.
#[derive(Clone, Debug, PartialEq)]
pub struct ChemicalSourceTerms {
    /// Net molar production rate per tracked species [kmol/(m³·s)]
    pub molar_production: Vec<f64>,

    /// Net mass production rate per tracked species [kg/(m³·s)]
    pub mass_production: Vec<f64>,

    /// Net reaction power density [W/m³], positive when exothermic
    pub heat_release: f64,
}

impl ChemicalSourceTerms {
    pub fn zeroed(n_species: usize) -> Self {
        Self {
            molar_production: vec![0.0; n_species],
            mass_production: vec![0.0; n_species],
            heat_release: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_core::units::pa;

    #[test]
    fn unset_state_reports_unset() {
        let state = ThermodynamicState::unset(pa(101_325.0));
        assert!(!state.is_set());
        assert_eq!(state.pressure.value, 101_325.0);
    }

    #[test]
    fn summary_reports_set_state() {
        let mut state = ThermodynamicState::unset(pa(101_325.0));
        state.temperature = k(300.0);
        state.cp = 1400.0;
        state.cv = 1000.0;
        assert!(state.is_set());
        assert!(state.summary().contains("T=300.00K"));
    }

    #[test]
    fn quantities_convert_units() {
        use uom::si::pressure::bar;
        use uom::si::thermodynamic_temperature::degree_celsius;

        let mut state = ThermodynamicState::unset(pa(101_325.0));
        state.temperature = k(373.15);
        assert!((state.temperature.get::<degree_celsius>() - 100.0).abs() < 1e-9);
        assert!((state.pressure.get::<bar>() - 1.01325).abs() < 1e-12);
    }

    #[test]
    fn per_species_buffers_have_species_length() {
        assert_eq!(TransportState::unset(3).mass_diffusivity.len(), 3);
        let sources = ChemicalSourceTerms::zeroed(3);
        assert_eq!(sources.molar_production.len(), 3);
        assert_eq!(sources.mass_production.len(), 3);
        assert_eq!(sources.heat_release, 0.0);
    }
}
