//! Reacting-mixture property engine.
//!
//! Drives a [`ChemistryBackend`] at one mesh point at a time: composition in,
//! full thermodynamic, transport and chemistry closure out. Species are
//! tracked in configuration order; the backend may know more species than
//! are tracked, and those are held at zero mass fraction.

use crate::backend::ChemistryBackend;
use crate::composition::{BalancePolicy, SpeciesComposition};
use crate::diffusivity::{LocalTransport, MassDiffusivityModel};
use crate::enthalpy_diffusion::{DiffusionWeights, enthalpy_diffusion_coefficients};
use crate::error::{FluidError, FluidResult};
use crate::mechanism_backend::MechanismBackend;
use crate::model::{FluidModel, validation};
use crate::state::{ChemicalSourceTerms, SpecEnthalpy, ThermodynamicState, TransportState};
use crate::temperature::{NewtonSettings, TemperatureSolution, solve_temperature};
use rf_config::{ReactingMixtureDef, validate::validate_reacting_mixture};
use rf_core::timing::{Timer, closure_timing};
use rf_core::units::{Temperature, kg_per_m3, pa, pa_s};

/// Backend-order reference data used by the enthalpy-diffusion helpers.
#[derive(Clone, Copy)]
enum ReferenceWeights {
    /// H°/RT with prefactor RT
    Enthalpy,
    /// Cp°/R with prefactor R
    HeatCapacity,
}

pub struct ReactingMixture<B: ChemistryBackend = Box<dyn ChemistryBackend>> {
    backend: B,
    composition: SpeciesComposition,
    trial: SpeciesComposition,
    /// Tracked species → backend index
    backend_index: Vec<usize>,
    /// Molecular weights in tracked order [kg/kmol]
    molar_mass: Vec<f64>,
    diffusivity_models: Vec<MassDiffusivityModel>,
    needs_mixture_averaged: bool,

    pressure: f64,
    gas_constant_ref: f64,
    newton: NewtonSettings,
    policy: BalancePolicy,

    thermo: ThermodynamicState,
    transport: TransportState,
    sources: ChemicalSourceTerms,

    /// Backend-order mass fractions of the last `set_state`
    y_state: Vec<f64>,
    /// Backend-order mass fractions used by the temperature inversion
    y_trial: Vec<f64>,
    mix_diff: Vec<f64>,
    rates: Vec<f64>,
    species_scratch: Vec<f64>,
    weights: Vec<f64>,
    /// False once a temperature inversion has moved the backend away from
    /// the last `set_state`.
    backend_synced: bool,
}

impl ReactingMixture {
    /// Build an engine on the built-in mechanism backend named by `def`.
    pub fn from_def(def: &ReactingMixtureDef) -> FluidResult<Self> {
        let backend = MechanismBackend::from_locator(&def.mechanism, def.transport_model)?;
        Self::new(Box::new(backend) as Box<dyn ChemistryBackend>, def)
    }
}

impl<B: ChemistryBackend> ReactingMixture<B> {
    /// Build an engine around an already loaded backend.
    pub fn new(backend: B, def: &ReactingMixtureDef) -> FluidResult<Self> {
        if def.species.len() > def.max_species {
            return Err(FluidError::TooManySpecies {
                count: def.species.len(),
                max: def.max_species,
            });
        }
        validate_reacting_mixture(def)?;

        if backend.phase() != def.phase {
            return Err(FluidError::Backend {
                message: format!(
                    "mechanism {} provides phase '{}', configuration requests '{}'",
                    backend.name(),
                    backend.phase(),
                    def.phase
                ),
            });
        }

        let backend_index = def
            .species
            .iter()
            .map(|name| {
                backend
                    .species_index(name)
                    .ok_or_else(|| FluidError::UnknownSpecies {
                        name: name.clone(),
                        mechanism: backend.name().to_string(),
                    })
            })
            .collect::<FluidResult<Vec<_>>>()?;

        let weights_backend = backend.molecular_weights();
        let molar_mass: Vec<f64> = backend_index.iter().map(|&i| weights_backend[i]).collect();

        let diffusivity_models: Vec<MassDiffusivityModel> = def
            .species
            .iter()
            .map(|name| MassDiffusivityModel::from(&def.diffusivity_law(name)))
            .collect();
        let needs_mixture_averaged = diffusivity_models.iter().any(|m| m.uses_backend());

        let n = def.species.len();
        let n_backend = backend.n_species();
        let n_reactions = backend.n_reactions();
        let pressure = pa(def.operating_pressure_pa);

        tracing::debug!(
            mechanism = backend.name(),
            species = n,
            backend_species = n_backend,
            reactions = n_reactions,
            balance = %def.species[n - 1],
            "reacting mixture ready"
        );

        Ok(Self {
            composition: SpeciesComposition::new(def.species.clone())?,
            trial: SpeciesComposition::new(def.species.clone())?,
            backend,
            backend_index,
            molar_mass,
            diffusivity_models,
            needs_mixture_averaged,
            pressure: def.operating_pressure_pa,
            gas_constant_ref: def.gas_constant_ref,
            newton: NewtonSettings::from(&def.newton),
            policy: BalancePolicy::from(def.balance_policy),
            thermo: ThermodynamicState::unset(pressure),
            transport: TransportState::unset(n),
            sources: ChemicalSourceTerms::zeroed(n),
            y_state: vec![0.0; n_backend],
            y_trial: vec![0.0; n_backend],
            mix_diff: vec![0.0; n_backend],
            rates: vec![0.0; n_reactions],
            species_scratch: vec![0.0; n_backend],
            weights: vec![0.0; n],
            backend_synced: false,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Composition of the last evaluated state.
    pub fn composition(&self) -> &SpeciesComposition {
        &self.composition
    }

    /// Operating pressure [Pa].
    pub fn operating_pressure(&self) -> f64 {
        self.pressure
    }

    /// Reference gas constant used to nondimensionalise the outer solver.
    pub fn gas_constant_ref(&self) -> f64 {
        self.gas_constant_ref
    }

    pub fn newton_settings(&self) -> &NewtonSettings {
        &self.newton
    }

    pub fn diffusivity_models(&self) -> &[MassDiffusivityModel] {
        &self.diffusivity_models
    }

    /// Molecular weights of the tracked species [kg/kmol].
    pub fn molar_masses(&self) -> &[f64] {
        &self.molar_mass
    }

    fn scatter(comp: &SpeciesComposition, index: &[usize], out: &mut [f64]) {
        out.fill(0.0);
        for (&i, &y) in index.iter().zip(comp.fractions()) {
            out[i] = y;
        }
    }

    fn compute_mass_diffusivity(&mut self) {
        if self.needs_mixture_averaged {
            self.backend.mix_diff_coeffs_mass(&mut self.mix_diff);
        }
        let local = LocalTransport {
            density: self.thermo.density.value,
            viscosity: self.transport.viscosity.value,
            conductivity: self.transport.conductivity,
            cp: self.thermo.cp,
        };
        for ((d, model), &i) in self
            .transport
            .mass_diffusivity
            .iter_mut()
            .zip(&self.diffusivity_models)
            .zip(&self.backend_index)
        {
            *d = model.evaluate(&local, self.mix_diff[i]);
        }
    }

    /// Net production rates, mass-based source terms and heat release.
    fn compute_source_terms(&mut self) {
        let _timer = Timer::start(&closure_timing::SOURCE_TERMS);

        self.backend.net_rates_of_progress(&mut self.rates);
        self.backend
            .partial_molar_enthalpies(&mut self.species_scratch);

        let mut heat_release = 0.0;
        for (k, &i) in self.backend_index.iter().enumerate() {
            let omega: f64 = self
                .rates
                .iter()
                .enumerate()
                .map(|(r, q)| self.backend.net_stoich_coeff(i, r) * q)
                .sum();
            self.sources.molar_production[k] = omega;
            self.sources.mass_production[k] = self.molar_mass[k] * omega;
            heat_release -= self.species_scratch[i] * omega;
        }
        self.sources.heat_release = heat_release;
    }

    /// Put the backend back at the last `set_state` point if an inversion
    /// moved it.
    fn resync_backend(&mut self) -> FluidResult<()> {
        if !self.thermo.is_set() {
            return Err(FluidError::InvalidArg {
                what: "enthalpy diffusivity requested before any state was set",
            });
        }
        if !self.backend_synced {
            self.backend
                .set_state_tpy(self.thermo.temperature.value, self.pressure, &self.y_state)?;
            self.backend_synced = true;
        }
        Ok(())
    }

    fn reference_diffusion(&mut self, kind: ReferenceWeights) -> FluidResult<Vec<f64>> {
        self.resync_backend()?;

        let rt = self.backend.rt();
        let prefactor = match kind {
            ReferenceWeights::Enthalpy => {
                self.backend.enthalpy_rt_ref(&mut self.species_scratch);
                rt
            }
            ReferenceWeights::HeatCapacity => {
                self.backend.cp_r_ref(&mut self.species_scratch);
                rt / self.backend.temperature()
            }
        };
        for (w, &i) in self.weights.iter_mut().zip(&self.backend_index) {
            *w = self.species_scratch[i];
        }

        let mut out = vec![0.0; self.weights.len() - 1];
        enthalpy_diffusion_coefficients(
            self.thermo.density.value,
            prefactor,
            DiffusionWeights {
                weights: &self.weights,
                diffusivity: &self.transport.mass_diffusivity,
                molar_mass: &self.molar_mass,
            },
            &mut out,
        )?;
        Ok(out)
    }
}

impl<B: ChemistryBackend> FluidModel for ReactingMixture<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn species(&self) -> &[String] {
        self.composition.names()
    }

    fn set_state(&mut self, t: Temperature, transported: &[f64]) -> FluidResult<()> {
        let _timer = Timer::start(&closure_timing::SET_STATE);
        validation::validate_temperature(t)?;

        // Committed only once the backend accepts the point.
        self.trial.update(transported, self.policy)?;
        Self::scatter(&self.trial, &self.backend_index, &mut self.y_trial);
        self.backend_synced = false;
        self.backend
            .set_state_tpy(t.value, self.pressure, &self.y_trial)?;
        std::mem::swap(&mut self.composition, &mut self.trial);
        std::mem::swap(&mut self.y_state, &mut self.y_trial);
        self.backend_synced = true;

        self.thermo.temperature = t;
        self.thermo.density = kg_per_m3(self.backend.density());
        self.thermo.enthalpy = self.backend.enthalpy_mass();
        self.thermo.cp = self.backend.cp_mass();
        self.thermo.cv = self.backend.cv_mass();
        self.transport.viscosity = pa_s(self.backend.viscosity());
        self.transport.conductivity = self.backend.thermal_conductivity();

        self.compute_mass_diffusivity();
        self.compute_source_terms();
        Ok(())
    }

    fn temperature_from_enthalpy(
        &mut self,
        h: SpecEnthalpy,
        transported: &[f64],
    ) -> FluidResult<TemperatureSolution> {
        let _timer = Timer::start(&closure_timing::TEMPERATURE_FROM_ENTHALPY);
        validation::validate_enthalpy(h)?;

        self.trial.update(transported, self.policy)?;
        Self::scatter(&self.trial, &self.backend_index, &mut self.y_trial);

        self.backend_synced = false;
        let backend = &mut self.backend;
        let y = &self.y_trial;
        let p = self.pressure;
        solve_temperature(h, &self.newton, |t| {
            backend.set_state_tpy(t, p, y)?;
            Ok((backend.enthalpy_mass(), backend.cp_mass()))
        })
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
        self.reference_diffusion(ReferenceWeights::Enthalpy)
    }

    fn grad_enthalpy_diffusivity(&mut self) -> FluidResult<Vec<f64>> {
        self.reference_diffusion(ReferenceWeights::HeatCapacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_config::{DiffusivityDef, DiffusivityLawDef, NewtonDef, TransportModelDef};
    use rf_core::units::k;

    fn fuel_def() -> ReactingMixtureDef {
        ReactingMixtureDef {
            species: vec!["FUEL".to_string(), "PROD".to_string()],
            mechanism: "single-step-fuel".to_string(),
            phase: "gas".to_string(),
            operating_pressure_pa: 101_325.0,
            transport_model: TransportModelDef::MixtureAveraged,
            gas_constant_ref: 1.0,
            max_species: 32,
            diffusivity: Vec::new(),
            newton: NewtonDef::default(),
            balance_policy: Default::default(),
        }
    }

    #[test]
    fn too_many_species_is_rejected_before_loading() {
        let mut def = fuel_def();
        def.max_species = 1;
        assert!(matches!(
            ReactingMixture::from_def(&def),
            Err(FluidError::TooManySpecies { count: 2, max: 1 })
        ));
    }

    #[test]
    fn unknown_species_is_rejected() {
        let mut def = fuel_def();
        def.species[0] = "H2".to_string();
        match ReactingMixture::from_def(&def) {
            Err(FluidError::UnknownSpecies { name, mechanism }) => {
                assert_eq!(name, "H2");
                assert_eq!(mechanism, "single-step-fuel");
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("H2 should not resolve"),
        }
    }

    #[test]
    fn phase_mismatch_is_rejected() {
        let mut def = fuel_def();
        def.phase = "liquid".to_string();
        assert!(matches!(
            ReactingMixture::from_def(&def),
            Err(FluidError::Backend { .. })
        ));
    }

    #[test]
    fn subset_of_backend_species_is_tracked() {
        let mut def = fuel_def();
        def.mechanism = "methane-one-step".to_string();
        def.species = vec!["CH4".to_string(), "O2".to_string(), "N2".to_string()];
        let mut mix = ReactingMixture::from_def(&def).unwrap();
        mix.set_state(k(1200.0), &[0.05, 0.22]).unwrap();

        assert_eq!(mix.mass_diffusivity().len(), 3);
        assert_eq!(mix.source_terms().len(), 3);
        // Methane and oxygen are consumed.
        assert!(mix.source_terms()[0] < 0.0);
        assert!(mix.source_terms()[1] < 0.0);
        assert_eq!(mix.source_terms()[2], 0.0);
    }

    #[test]
    fn constant_laws_skip_backend_diffusion() {
        let mut def = fuel_def();
        def.diffusivity = vec![
            DiffusivityDef {
                species: "FUEL".to_string(),
                law: DiffusivityLawDef::Constant { value: 1.0e-5 },
            },
            DiffusivityDef {
                species: "PROD".to_string(),
                law: DiffusivityLawDef::ConstantSchmidt { schmidt: 0.7 },
            },
        ];
        let mut mix = ReactingMixture::from_def(&def).unwrap();
        assert!(!mix.needs_mixture_averaged);
        mix.set_state(k(900.0), &[0.1]).unwrap();

        let d = mix.mass_diffusivity();
        assert_eq!(d[0], 1.0e-5);
        let expected = mix.viscosity().value / (mix.density().value * 0.7);
        assert!((d[1] - expected).abs() <= 1e-15 * expected.abs().max(1.0));
    }

    #[test]
    fn enthalpy_diffusivity_needs_a_state() {
        let mut mix = ReactingMixture::from_def(&fuel_def()).unwrap();
        assert!(matches!(
            mix.enthalpy_diffusivity(),
            Err(FluidError::InvalidArg { .. })
        ));
    }

    #[test]
    fn enthalpy_diffusivity_is_unaffected_by_an_inversion() {
        let mut mix = ReactingMixture::from_def(&fuel_def()).unwrap();
        mix.set_state(k(1500.0), &[0.05]).unwrap();
        let before = mix.enthalpy_diffusivity().unwrap();
        let grad_before = mix.grad_enthalpy_diffusivity().unwrap();

        mix.temperature_from_enthalpy(-1.0e6, &[0.3]).unwrap();

        assert_eq!(mix.enthalpy_diffusivity().unwrap(), before);
        assert_eq!(mix.grad_enthalpy_diffusivity().unwrap(), grad_before);
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn inversion_leaves_closure_state_alone() {
        let mut mix = ReactingMixture::from_def(&fuel_def()).unwrap();
        mix.set_state(k(1500.0), &[0.05]).unwrap();
        let thermo = mix.thermo().clone();
        let sol = mix.temperature_from_enthalpy(thermo.enthalpy, &[0.05]).unwrap();
        assert!(sol.outcome.is_converged());
        assert_eq!(mix.thermo(), &thermo);
        assert_eq!(mix.composition().fractions(), &[0.05, 0.95]);
    }

    #[test]
    fn reject_policy_applies_to_set_state() {
        let mut def = fuel_def();
        def.balance_policy = rf_config::BalancePolicyDef::Reject;
        let mut mix = ReactingMixture::from_def(&def).unwrap();
        mix.set_state(k(1500.0), &[0.05]).unwrap();
        let composition = mix.composition().clone();
        let thermo = mix.thermo().clone();

        assert!(matches!(
            mix.set_state(k(1000.0), &[1.2]),
            Err(FluidError::NonPhysical { .. })
        ));
        assert_eq!(mix.composition(), &composition);
        assert_eq!(mix.thermo(), &thermo);
    }

    #[test]
    fn backend_rejection_keeps_last_evaluated_point() {
        let mut def = fuel_def();
        def.mechanism = "methane-one-step".to_string();
        def.species = vec!["N2".to_string(), "CH4".to_string()];
        let mut mix = ReactingMixture::from_def(&def).unwrap();
        mix.set_state(k(1200.0), &[0.9]).unwrap();
        let composition = mix.composition().clone();
        let thermo = mix.thermo().clone();
        let diffusion = mix.enthalpy_diffusivity().unwrap();
        let grad_diffusion = mix.grad_enthalpy_diffusivity().unwrap();

        // Negative mean molecular weight.
        assert!(matches!(
            mix.set_state(k(1200.0), &[5.0]),
            Err(FluidError::Backend { .. })
        ));

        assert_eq!(mix.composition(), &composition);
        assert_eq!(mix.thermo(), &thermo);
        assert_eq!(mix.enthalpy_diffusivity().unwrap(), diffusion);
        assert_eq!(mix.grad_enthalpy_diffusivity().unwrap(), grad_diffusion);

        mix.set_state(k(1300.0), &[0.8]).unwrap();
        assert_eq!(mix.composition().fractions()[0], 0.8);
        assert_eq!(mix.temperature().value, 1300.0);
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let mut mix = ReactingMixture::from_def(&fuel_def()).unwrap();
        assert!(mix.set_state(k(0.0), &[0.05]).is_err());
        assert!(!mix.thermo().is_set());
    }
}
