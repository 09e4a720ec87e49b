//! Engine configuration schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub model: FluidModelDef,
}

/// Property model selected for the whole simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FluidModelDef {
    ReactingMixture(ReactingMixtureDef),
    IdealGas(IdealGasDef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactingMixtureDef {
    /// Tracked species. The last entry is the balance species.
    pub species: Vec<String>,
    /// Locator of the mechanism definition handed to the chemistry backend.
    pub mechanism: String,
    #[serde(default = "default_phase")]
    pub phase: String,
    pub operating_pressure_pa: f64,
    #[serde(default)]
    pub transport_model: TransportModelDef,
    #[serde(default = "default_gas_constant_ref")]
    pub gas_constant_ref: f64,
    #[serde(default = "default_max_species")]
    pub max_species: usize,
    /// Per-species diffusivity overrides; unlisted species use the backend.
    #[serde(default)]
    pub diffusivity: Vec<DiffusivityDef>,
    #[serde(default)]
    pub newton: NewtonDef,
    #[serde(default)]
    pub balance_policy: BalancePolicyDef,
}

impl ReactingMixtureDef {
    /// Diffusivity law configured for `species`, falling back to the backend.
    pub fn diffusivity_law(&self, species: &str) -> DiffusivityLawDef {
        self.diffusivity
            .iter()
            .find(|d| d.species == species)
            .map(|d| d.law.clone())
            .unwrap_or(DiffusivityLawDef::MixtureAveraged)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TransportModelDef {
    #[default]
    MixtureAveraged,
    UnityLewis,
}

impl TransportModelDef {
    pub fn key(&self) -> &'static str {
        match self {
            TransportModelDef::MixtureAveraged => "mixture-averaged",
            TransportModelDef::UnityLewis => "unity-lewis",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffusivityDef {
    pub species: String,
    pub law: DiffusivityLawDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiffusivityLawDef {
    /// Fixed value [m²/s].
    Constant { value: f64 },
    /// D = μ / (ρ·Sc).
    ConstantSchmidt { schmidt: f64 },
    /// D = k / (ρ·cp).
    UnityLewis,
    /// Mixture-averaged coefficient from the chemistry backend.
    MixtureAveraged,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NewtonDef {
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature_k: f64,
    #[serde(default = "default_newton_tolerance")]
    pub tolerance_k: f64,
    #[serde(default = "default_newton_max_iterations")]
    pub max_iterations: usize,
}

impl Default for NewtonDef {
    fn default() -> Self {
        Self {
            initial_temperature_k: default_initial_temperature(),
            tolerance_k: default_newton_tolerance(),
            max_iterations: default_newton_max_iterations(),
        }
    }
}

/// What to do when the transported fractions add up to more than one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BalancePolicyDef {
    #[default]
    Propagate,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdealGasDef {
    pub operating_pressure_pa: f64,
    /// Specific gas constant [J/(kg·K)].
    pub gas_constant: f64,
    /// Specific heat at constant pressure [J/(kg·K)].
    pub cp: f64,
    pub viscosity_pa_s: f64,
    pub conductivity_w_mk: f64,
    #[serde(default = "default_reference_temperature")]
    pub reference_temperature_k: f64,
}

fn default_phase() -> String {
    "gas".to_string()
}

fn default_gas_constant_ref() -> f64 {
    1.0
}

fn default_max_species() -> usize {
    32
}

fn default_initial_temperature() -> f64 {
    300.0
}

fn default_newton_tolerance() -> f64 {
    1e-5
}

fn default_newton_max_iterations() -> usize {
    20
}

fn default_reference_temperature() -> f64 {
    298.15
}
