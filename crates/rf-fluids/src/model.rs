//! Fluid property model trait, factory and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::ideal_gas::IdealGasModel;
use crate::reacting::ReactingMixture;
use crate::state::{
    ChemicalSourceTerms, MassDiffusivity, SpecEnthalpy, SpecHeatCapacity, ThermalConductivity,
    ThermodynamicState, TransportState,
};
use crate::temperature::TemperatureSolution;
use rf_config::{EngineConfig, FluidModelDef};
use rf_core::units::{Density, DynVisc, Temperature};

/// Per-point property closure consumed by an outer flow solver.
///
/// Implementations are stateful: every mutating call overwrites the state
/// observed through the accessors. One instance belongs to one execution
/// unit, hence `Send` but not `Sync`.
pub trait FluidModel: Send {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Tracked species in order; the last entry is the balance species.
    fn species(&self) -> &[String];

    fn n_species(&self) -> usize {
        self.species().len()
    }

    /// Evaluate the full closure at temperature `t` and the n−1 transported
    /// mass fractions.
    fn set_state(&mut self, t: Temperature, transported: &[f64]) -> FluidResult<()>;

    /// Invert h(T, Y) for T. Does not update the closure state.
    fn temperature_from_enthalpy(
        &mut self,
        h: SpecEnthalpy,
        transported: &[f64],
    ) -> FluidResult<TemperatureSolution>;

    fn thermo(&self) -> &ThermodynamicState;

    fn transport(&self) -> &TransportState;

    fn sources(&self) -> &ChemicalSourceTerms;

    /// Enthalpy-diffusion coefficients ρ·RT·(h°ᵢDᵢ/Mᵢ − h°ₙDₙ/Mₙ), length n−1.
    fn enthalpy_diffusivity(&mut self) -> FluidResult<Vec<f64>>;

    /// Gradient form ρ·R·(cp°ᵢDᵢ/Mᵢ − cp°ₙDₙ/Mₙ), length n−1.
    fn grad_enthalpy_diffusivity(&mut self) -> FluidResult<Vec<f64>>;

    fn temperature(&self) -> Temperature {
        self.thermo().temperature
    }

    fn density(&self) -> Density {
        self.thermo().density
    }

    fn enthalpy(&self) -> SpecEnthalpy {
        self.thermo().enthalpy
    }

    fn cp(&self) -> SpecHeatCapacity {
        self.thermo().cp
    }

    fn cv(&self) -> SpecHeatCapacity {
        self.thermo().cv
    }

    fn viscosity(&self) -> DynVisc {
        self.transport().viscosity
    }

    fn conductivity(&self) -> ThermalConductivity {
        self.transport().conductivity
    }

    fn mass_diffusivity(&self) -> &[MassDiffusivity] {
        &self.transport().mass_diffusivity
    }

    /// Mass-based chemical source terms [kg/(m³·s)], one per tracked species.
    fn source_terms(&self) -> &[f64] {
        &self.sources().mass_production
    }

    /// Net heat release [W/m³], positive when exothermic.
    fn heat_release(&self) -> f64 {
        self.sources().heat_release
    }
}

/// Build the property model selected by `config`.
pub fn build_fluid_model(config: &EngineConfig) -> FluidResult<Box<dyn FluidModel>> {
    let model: Box<dyn FluidModel> = match &config.model {
        FluidModelDef::ReactingMixture(def) => Box::new(ReactingMixture::from_def(def)?),
        FluidModelDef::IdealGas(def) => Box::new(IdealGasModel::new(def)?),
    };
    tracing::debug!(config = %config.name, model = model.name(), "built fluid model");
    Ok(model)
}

/// Validation helpers for fluid properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure enthalpy is finite (can be negative).
    pub fn validate_enthalpy(h: f64) -> FluidResult<()> {
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use rf_core::units::k;

    #[test]
    fn validate_positive_temperature() {
        assert!(validate_temperature(k(300.0)).is_ok());
        assert!(validate_temperature(k(-10.0)).is_err());
        assert!(validate_temperature(k(0.0)).is_err());
        assert!(validate_temperature(k(f64::NAN)).is_err());
    }

    #[test]
    fn validate_finite_enthalpy() {
        assert!(validate_enthalpy(-2.5e6).is_ok());
        assert!(validate_enthalpy(f64::INFINITY).is_err());
    }

    #[test]
    fn factory_builds_each_model_kind() {
        let reacting = rf_config::parse_yaml(
            r#"
name: flame
model:
  type: reacting_mixture
  species: [FUEL, PROD]
  mechanism: single-step-fuel
  operating_pressure_pa: 101325.0
"#,
        )
        .unwrap();
        let model = build_fluid_model(&reacting).unwrap();
        assert_eq!(model.name(), "single-step-fuel");
        assert_eq!(model.n_species(), 2);

        let ideal = rf_config::parse_yaml(
            r#"
name: air
model:
  type: ideal_gas
  operating_pressure_pa: 101325.0
  gas_constant: 287.0
  cp: 1005.0
  viscosity_pa_s: 1.8e-5
  conductivity_w_mk: 0.026
"#,
        )
        .unwrap();
        let model = build_fluid_model(&ideal).unwrap();
        assert_eq!(model.name(), "ideal-gas");
        assert_eq!(model.n_species(), 1);
    }

    #[test]
    fn factory_reports_unknown_species() {
        let config = rf_config::parse_yaml(
            r#"
name: bad
model:
  type: reacting_mixture
  species: [H2, PROD]
  mechanism: single-step-fuel
  operating_pressure_pa: 101325.0
"#,
        )
        .unwrap();
        assert!(matches!(
            build_fluid_model(&config),
            Err(FluidError::UnknownSpecies { .. })
        ));
    }
}
