//! Built-in ideal-gas chemistry backend.
//!
//! Deterministic and dependency-free: two-term heat-capacity thermodynamics,
//! power-law viscosity, Eucken conductivity, mixture-averaged diffusion from
//! averaged binary coefficients and irreversible Arrhenius kinetics. Good
//! enough to drive the property engine end to end and to pin down its
//! control flow in tests.

use crate::backend::ChemistryBackend;
use crate::error::{FluidError, FluidResult};
use crate::mechanism::Mechanism;
use rf_config::TransportModelDef;
use rf_core::units::constants::R_UNIVERSAL;

/// Below this, a species' neighbours are treated as absent.
const MIN_MOLE_FRACTION_SUM: f64 = 1e-12;

pub struct MechanismBackend {
    mechanism: Mechanism,
    transport: TransportModelDef,
    molecular_weights: Vec<f64>,
    /// Net stoichiometry, row-major [species][reaction]
    net_stoich: Vec<f64>,

    t: f64,
    p: f64,
    y: Vec<f64>,
    x: Vec<f64>,
    mean_molar_mass: f64,
    density: f64,
    h_molar: Vec<f64>,
    cp_molar: Vec<f64>,
}

impl MechanismBackend {
    pub fn new(mechanism: Mechanism, transport: TransportModelDef) -> Self {
        let n = mechanism.species.len();
        let n_reactions = mechanism.reactions.len();
        let molecular_weights: Vec<f64> = mechanism.species.iter().map(|s| s.molar_mass).collect();

        let mut net_stoich = vec![0.0; n * n_reactions];
        for (r, reaction) in mechanism.reactions.iter().enumerate() {
            for k in 0..n {
                net_stoich[k * n_reactions + r] = reaction.net_stoich(k);
            }
        }

        tracing::debug!(
            mechanism = %mechanism.name,
            species = n,
            reactions = n_reactions,
            transport = transport.key(),
            "loaded built-in mechanism"
        );

        Self {
            mechanism,
            transport,
            molecular_weights,
            net_stoich,
            t: 0.0,
            p: 0.0,
            y: vec![0.0; n],
            x: vec![0.0; n],
            mean_molar_mass: 0.0,
            density: 0.0,
            h_molar: vec![0.0; n],
            cp_molar: vec![0.0; n],
        }
    }

    /// Load a built-in mechanism by locator.
    pub fn from_locator(locator: &str, transport: TransportModelDef) -> FluidResult<Self> {
        Ok(Self::new(Mechanism::from_locator(locator)?, transport))
    }

    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    /// Molar concentration of species `k` [kmol/m³], clipped at zero.
    fn concentration(&self, k: usize) -> f64 {
        (self.density * self.y[k] / self.molecular_weights[k]).max(0.0)
    }

    fn mixture_averaged(&self, out: &mut [f64]) {
        let n = self.y.len();
        let pure: Vec<f64> = self
            .mechanism
            .species
            .iter()
            .map(|s| s.diffusivity(self.t, self.p))
            .collect();

        for k in 0..n {
            let mut sum = 0.0;
            for j in (0..n).filter(|&j| j != k) {
                let d_kj = 0.5 * (pure[k] + pure[j]);
                sum += self.x[j] / d_kj;
            }
            out[k] = if sum > MIN_MOLE_FRACTION_SUM {
                (1.0 - self.y[k]) / sum
            } else {
                pure[k]
            };
        }
    }
}

impl ChemistryBackend for MechanismBackend {
    fn name(&self) -> &str {
        &self.mechanism.name
    }

    fn phase(&self) -> &str {
        &self.mechanism.phase
    }

    fn n_species(&self) -> usize {
        self.molecular_weights.len()
    }

    fn n_reactions(&self) -> usize {
        self.mechanism.reactions.len()
    }

    fn species_index(&self, name: &str) -> Option<usize> {
        self.mechanism.species_index(name)
    }

    fn molecular_weights(&self) -> &[f64] {
        &self.molecular_weights
    }

    fn set_state_tpy(&mut self, t: f64, p: f64, y: &[f64]) -> FluidResult<()> {
        if !t.is_finite() || t <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !p.is_finite() || p <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if y.len() != self.y.len() {
            return Err(FluidError::Backend {
                message: format!(
                    "{} expects {} mass fractions, got {}",
                    self.mechanism.name,
                    self.y.len(),
                    y.len()
                ),
            });
        }

        let inv_mean: f64 = y
            .iter()
            .zip(&self.molecular_weights)
            .map(|(yk, wk)| yk / wk)
            .sum();
        let mean_molar_mass = 1.0 / inv_mean;
        if !mean_molar_mass.is_finite() || mean_molar_mass <= 0.0 {
            return Err(FluidError::Backend {
                message: format!(
                    "non-positive mean molecular weight for composition {:?}",
                    y
                ),
            });
        }

        self.t = t;
        self.p = p;
        self.y.copy_from_slice(y);
        self.mean_molar_mass = mean_molar_mass;
        self.density = p * mean_molar_mass / (R_UNIVERSAL * t);
        for (k, species) in self.mechanism.species.iter().enumerate() {
            self.x[k] = y[k] * mean_molar_mass / self.molecular_weights[k];
            self.h_molar[k] = species.enthalpy_molar(t);
            self.cp_molar[k] = species.cp_molar(t);
        }
        Ok(())
    }

    fn temperature(&self) -> f64 {
        self.t
    }

    fn density(&self) -> f64 {
        self.density
    }

    fn enthalpy_mass(&self) -> f64 {
        self.y
            .iter()
            .zip(&self.h_molar)
            .zip(&self.molecular_weights)
            .map(|((yk, hk), wk)| yk * hk / wk)
            .sum()
    }

    fn cp_mass(&self) -> f64 {
        self.y
            .iter()
            .zip(&self.cp_molar)
            .zip(&self.molecular_weights)
            .map(|((yk, cpk), wk)| yk * cpk / wk)
            .sum()
    }

    fn cv_mass(&self) -> f64 {
        self.cp_mass() - R_UNIVERSAL / self.mean_molar_mass
    }

    fn rt(&self) -> f64 {
        R_UNIVERSAL * self.t
    }

    fn viscosity(&self) -> f64 {
        self.mechanism
            .species
            .iter()
            .zip(&self.x)
            .map(|(s, xk)| xk * s.viscosity(self.t))
            .sum()
    }

    fn thermal_conductivity(&self) -> f64 {
        // Eucken: k = μ·(cp + 5/4·R/W)
        self.viscosity() * (self.cp_mass() + 1.25 * R_UNIVERSAL / self.mean_molar_mass)
    }

    fn mix_diff_coeffs_mass(&self, out: &mut [f64]) {
        match self.transport {
            TransportModelDef::MixtureAveraged => self.mixture_averaged(out),
            TransportModelDef::UnityLewis => {
                let d = self.thermal_conductivity() / (self.density * self.cp_mass());
                out.fill(d);
            }
        }
    }

    fn net_rates_of_progress(&self, out: &mut [f64]) {
        for (q, reaction) in out.iter_mut().zip(&self.mechanism.reactions) {
            let rc = reaction.rate_constant;
            let k_forward = rc.preexponential_factor
                * self.t.powf(rc.temperature_exponent)
                * (-rc.activation_energy / (R_UNIVERSAL * self.t)).exp();
            let mass_action: f64 = reaction
                .orders
                .iter()
                .map(|&(k, order)| self.concentration(k).powf(order))
                .product();
            *q = k_forward * mass_action;
        }
    }

    fn net_stoich_coeff(&self, species: usize, reaction: usize) -> f64 {
        self.net_stoich[species * self.n_reactions() + reaction]
    }

    fn partial_molar_enthalpies(&self, out: &mut [f64]) {
        // Ideal mixture: partial molar enthalpy equals the pure-species value.
        out.copy_from_slice(&self.h_molar);
    }

    fn enthalpy_rt_ref(&self, out: &mut [f64]) {
        let rt = self.rt();
        for (o, h) in out.iter_mut().zip(&self.h_molar) {
            *o = h / rt;
        }
    }

    fn cp_r_ref(&self, out: &mut [f64]) {
        for (o, cp) in out.iter_mut().zip(&self.cp_molar) {
            *o = cp / R_UNIVERSAL;
        }
    }
}
