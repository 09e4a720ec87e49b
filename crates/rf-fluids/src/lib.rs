//! rf-fluids: per-point reacting-flow property closure.
//!
//! Provides:
//! - Species composition built from transported mass fractions
//! - The `ChemistryBackend` capability and a built-in mechanism backend
//! - Per-species mass-diffusivity laws
//! - The reacting-mixture engine and a calorically perfect ideal gas
//! - Temperature-from-enthalpy inversion
//! - `FluidModel` trait and a configuration-driven factory
//!
//! # Architecture
//!
//! Outer solvers talk to the `FluidModel` trait only. The reacting mixture
//! never evaluates kinetics or thermodynamic fits itself; it drives a
//! `ChemistryBackend`, so another chemistry library can be plugged in by
//! implementing that trait.
//!
//! # Example
//!
//! ```
//! use rf_config::parse_yaml;
//! use rf_core::units::k;
//! use rf_fluids::{FluidModel, build_fluid_model};
//!
//! let config = parse_yaml(
//!     r#"
//! name: premixed
//! model:
//!   type: reacting_mixture
//!   species: [FUEL, PROD]
//!   mechanism: single-step-fuel
//!   operating_pressure_pa: 101325.0
//! "#,
//! )
//! .unwrap();
//!
//! let mut model = build_fluid_model(&config).unwrap();
//! model.set_state(k(1500.0), &[0.05]).unwrap();
//! println!("Density: {} kg/m³", model.density().value);
//! println!("Heat release: {} W/m³", model.heat_release());
//! ```

pub mod backend;
pub mod composition;
pub mod diffusivity;
pub mod enthalpy_diffusion;
pub mod error;
pub mod ideal_gas;
pub mod mechanism;
pub mod mechanism_backend;
pub mod model;
pub mod reacting;
pub mod species;
pub mod state;
pub mod temperature;

// Re-exports for ergonomics
pub use backend::ChemistryBackend;
pub use composition::{BalancePolicy, SpeciesComposition};
pub use diffusivity::{LocalTransport, MassDiffusivityModel};
pub use enthalpy_diffusion::{DiffusionWeights, enthalpy_diffusion_coefficients};
pub use error::{FluidError, FluidResult};
pub use ideal_gas::IdealGasModel;
pub use mechanism::{Mechanism, RateConstant, Reaction};
pub use mechanism_backend::MechanismBackend;
pub use model::{FluidModel, build_fluid_model};
pub use reacting::ReactingMixture;
pub use species::{Species, SpeciesData};
pub use state::{
    ChemicalSourceTerms, MassDiffusivity, SpecEnthalpy, SpecHeatCapacity, ThermalConductivity,
    ThermodynamicState, TransportState,
};
pub use temperature::{NewtonSettings, SolveOutcome, TemperatureSolution, solve_temperature};
