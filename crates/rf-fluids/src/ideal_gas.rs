//! Single-component calorically perfect gas.
//!
//! The non-reacting counterpart of [`crate::reacting::ReactingMixture`]:
//! one species, constant heat capacity and transport properties, no
//! chemistry. Temperature from enthalpy is closed form.

use crate::composition::{BalancePolicy, SpeciesComposition};
use crate::error::FluidResult;
use crate::model::{FluidModel, validation};
use crate::state::{ChemicalSourceTerms, SpecEnthalpy, ThermodynamicState, TransportState};
use crate::temperature::TemperatureSolution;
use rf_config::{IdealGasDef, validate::validate_ideal_gas};
use rf_core::timing::{Timer, closure_timing};
use rf_core::units::{Temperature, kg_per_m3, pa, pa_s};

/// Species label of the single component.
const GAS_SPECIES: &str = "GAS";

#[derive(Debug, Clone)]
pub struct IdealGasModel {
    /// Operating pressure [Pa]
    pressure: f64,
    /// Specific gas constant [J/(kg·K)]
    gas_constant: f64,
    /// Frozen specific heat at constant pressure [J/(kg·K)]
    cp: f64,
    /// Temperature at which h = 0 [K]
    reference_temperature: f64,
    composition: SpeciesComposition,
    thermo: ThermodynamicState,
    transport: TransportState,
    sources: ChemicalSourceTerms,
}

impl IdealGasModel {
    pub fn new(def: &IdealGasDef) -> FluidResult<Self> {
        validate_ideal_gas(def)?;

        let mut transport = TransportState::unset(1);
        transport.viscosity = pa_s(def.viscosity_pa_s);
        transport.conductivity = def.conductivity_w_mk;

        Ok(Self {
            pressure: def.operating_pressure_pa,
            gas_constant: def.gas_constant,
            cp: def.cp,
            reference_temperature: def.reference_temperature_k,
            composition: SpeciesComposition::new(vec![GAS_SPECIES.to_string()])?,
            thermo: ThermodynamicState::unset(pa(def.operating_pressure_pa)),
            transport,
            sources: ChemicalSourceTerms::zeroed(1),
        })
    }

    /// Enthalpy at `t_k` with constant cp.
    ///
    /// ```text
    /// h(T) = cp · (T − T_ref)
    /// ```
    pub fn enthalpy_at(&self, t_k: f64) -> f64 {
        self.cp * (t_k - self.reference_temperature)
    }

    /// Density from the ideal gas law `ρ = P / (R·T)`.
    pub fn density_at(&self, t_k: f64) -> f64 {
        self.pressure / (self.gas_constant * t_k)
    }
}

impl FluidModel for IdealGasModel {
    fn name(&self) -> &str {
        "ideal-gas"
    }

    fn species(&self) -> &[String] {
        self.composition.names()
    }

    fn set_state(&mut self, t: Temperature, transported: &[f64]) -> FluidResult<()> {
        let _timer = Timer::start(&closure_timing::SET_STATE);
        validation::validate_temperature(t)?;
        self.composition.update(transported, BalancePolicy::Reject)?;

        let density = self.density_at(t.value);
        self.thermo.temperature = t;
        self.thermo.density = kg_per_m3(density);
        self.thermo.enthalpy = self.enthalpy_at(t.value);
        self.thermo.cp = self.cp;
        self.thermo.cv = self.cp - self.gas_constant;
        self.transport.mass_diffusivity[0] = self.transport.conductivity / (density * self.cp);
        Ok(())
    }

    fn temperature_from_enthalpy(
        &mut self,
        h: SpecEnthalpy,
        transported: &[f64],
    ) -> FluidResult<TemperatureSolution> {
        validation::validate_enthalpy(h)?;
        // Length check only; the single component is always pure.
        SpeciesComposition::from_transported(
            self.composition.names().to_vec(),
            transported,
            BalancePolicy::Reject,
        )?;

        let solution = TemperatureSolution::exact(self.reference_temperature + h / self.cp);
        if !solution.outcome.is_converged() {
            tracing::warn!(
                h_target = h,
                temperature = solution.temperature.value,
                "negative temperature from ideal-gas enthalpy inversion"
            );
        }
        Ok(solution)
    }

    fn thermo(&self) -> &ThermodynamicState {
        &self.thermo
    }

    fn transport(&self) -> &TransportState {
        &self.transport
    }

    fn sources(&self) -> &ChemicalSourceTerms {
        &self.sources
    }

    fn enthalpy_diffusivity(&mut self) -> FluidResult<Vec<f64>> {
        Ok(Vec::new())
    }

    fn grad_enthalpy_diffusivity(&mut self) -> FluidResult<Vec<f64>> {
        Ok(Vec::new())
    }
}
