//! Fluid property errors.

use rf_config::ValidationError;
use rf_core::RfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while building or evaluating a property model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, temperature, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// More species configured than the engine was allowed to hold.
    #[error("Too many species: {count} configured, maximum is {max}")]
    TooManySpecies { count: usize, max: usize },

    /// A configured species is not part of the loaded mechanism.
    #[error("Species {name} not found in mechanism {mechanism}")]
    UnknownSpecies { name: String, mechanism: String },

    /// No mechanism is known under the given locator.
    #[error("Unknown mechanism: {locator}")]
    UnknownMechanism { locator: String },

    /// Chemistry backend error.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Configuration rejected before construction.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    /// Numeric precondition from rf-core.
    #[error(transparent)]
    Core(#[from] RfError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical {
            what: "temperature",
        };
        assert!(err.to_string().contains("temperature"));

        let err = FluidError::TooManySpecies { count: 40, max: 32 };
        assert!(err.to_string().contains("40"));
        assert!(err.to_string().contains("32"));
    }

    #[test]
    fn core_error_converts() {
        let core = RfError::LengthMismatch {
            what: "transported fractions",
            expected: 1,
            got: 2,
        };
        let err: FluidError = core.clone().into();
        assert_eq!(err, FluidError::Core(core));
    }
}
