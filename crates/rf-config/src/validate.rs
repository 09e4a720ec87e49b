//! Engine configuration validation logic.

use crate::schema::{
    DiffusivityLawDef, EngineConfig, FluidModelDef, IdealGasDef, NewtonDef, ReactingMixtureDef,
};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Too many species: {count} configured, maximum is {max}")]
    TooManySpecies { count: usize, max: usize },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &EngineConfig) -> Result<(), ValidationError> {
    if config.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    match &config.model {
        FluidModelDef::ReactingMixture(def) => validate_reacting_mixture(def),
        FluidModelDef::IdealGas(def) => validate_ideal_gas(def),
    }
}

pub fn validate_reacting_mixture(def: &ReactingMixtureDef) -> Result<(), ValidationError> {
    if def.species.is_empty() {
        return Err(invalid("species", "[]", "at least one species is required"));
    }
    if def.max_species == 0 {
        return Err(invalid("max_species", "0", "must be at least 1"));
    }
    if def.species.len() > def.max_species {
        return Err(ValidationError::TooManySpecies {
            count: def.species.len(),
            max: def.max_species,
        });
    }

    let mut names = HashSet::new();
    for name in &def.species {
        if name.trim().is_empty() {
            return Err(invalid("species", name, "species names must not be blank"));
        }
        if !names.insert(name.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: name.clone(),
                context: "species".to_string(),
            });
        }
    }

    if def.mechanism.trim().is_empty() {
        return Err(invalid("mechanism", &def.mechanism, "locator must not be empty"));
    }
    positive("operating_pressure_pa", def.operating_pressure_pa)?;
    positive("gas_constant_ref", def.gas_constant_ref)?;

    let mut overridden = HashSet::new();
    for entry in &def.diffusivity {
        if !names.contains(entry.species.as_str()) {
            return Err(ValidationError::MissingReference {
                id: entry.species.clone(),
                context: "diffusivity species".to_string(),
            });
        }
        if !overridden.insert(entry.species.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: entry.species.clone(),
                context: "diffusivity".to_string(),
            });
        }
        match entry.law {
            DiffusivityLawDef::Constant { value } => positive("diffusivity.value", value)?,
            DiffusivityLawDef::ConstantSchmidt { schmidt } => {
                positive("diffusivity.schmidt", schmidt)?
            }
            DiffusivityLawDef::UnityLewis | DiffusivityLawDef::MixtureAveraged => {}
        }
    }

    validate_newton(&def.newton)
}

fn validate_newton(newton: &NewtonDef) -> Result<(), ValidationError> {
    positive("newton.initial_temperature_k", newton.initial_temperature_k)?;
    positive("newton.tolerance_k", newton.tolerance_k)?;
    if newton.max_iterations == 0 {
        return Err(invalid("newton.max_iterations", "0", "must be at least 1"));
    }
    Ok(())
}

pub fn validate_ideal_gas(def: &IdealGasDef) -> Result<(), ValidationError> {
    positive("operating_pressure_pa", def.operating_pressure_pa)?;
    positive("gas_constant", def.gas_constant)?;
    positive("cp", def.cp)?;
    positive("viscosity_pa_s", def.viscosity_pa_s)?;
    positive("conductivity_w_mk", def.conductivity_w_mk)?;
    positive("reference_temperature_k", def.reference_temperature_k)?;
    if def.cp <= def.gas_constant {
        return Err(invalid(
            "cp",
            &def.cp.to_string(),
            "must exceed the specific gas constant so that cv > 0",
        ));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &value.to_string(), "must be positive and finite"))
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
