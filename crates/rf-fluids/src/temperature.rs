//! Temperature from enthalpy by Newton iteration.
//!
//! Only the forward map T → h is available, but every forward evaluation
//! also yields cp = ∂h/∂T, which is exactly the Newton derivative.

use crate::error::{FluidError, FluidResult};
use rf_config::NewtonDef;
use rf_core::units::{Temperature, k};

/// Newton iteration controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonSettings {
    /// Starting temperature [K]
    pub initial_temperature: f64,
    /// Convergence threshold on |ΔT| [K]
    pub tolerance: f64,
    /// Upper bound on forward evaluations
    pub max_iterations: usize,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            initial_temperature: 300.0,
            tolerance: 1e-5,
            max_iterations: 20,
        }
    }
}

impl From<&NewtonDef> for NewtonSettings {
    fn from(def: &NewtonDef) -> Self {
        Self {
            initial_temperature: def.initial_temperature_k,
            tolerance: def.tolerance_k,
            max_iterations: def.max_iterations,
        }
    }
}

/// How the iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Converged,
    /// Iteration cap reached; the last estimate is returned.
    MaxIterExceeded,
    /// An iterate went below absolute zero; that iterate is returned.
    DivergedNegativeTemperature,
}

impl SolveOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveOutcome::Converged)
    }
}

/// Best-effort temperature together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSolution {
    pub temperature: Temperature,
    /// Forward evaluations performed
    pub iterations: usize,
    pub outcome: SolveOutcome,
}

impl TemperatureSolution {
    /// Closed-form inversion, no iteration needed.
    pub fn exact(t: f64) -> Self {
        let outcome = if t < 0.0 {
            SolveOutcome::DivergedNegativeTemperature
        } else {
            SolveOutcome::Converged
        };
        Self {
            temperature: k(t),
            iterations: 0,
            outcome,
        }
    }
}

/// Solve `h(T) = h_target`.
///
/// `eval(T)` must return `(h, cp)` at `T`. It is called at most
/// `settings.max_iterations` times. Non-convergence is not an error: it is
/// logged and reported through [`TemperatureSolution::outcome`].
pub fn solve_temperature<F>(
    h_target: f64,
    settings: &NewtonSettings,
    mut eval: F,
) -> FluidResult<TemperatureSolution>
where
    F: FnMut(f64) -> FluidResult<(f64, f64)>,
{
    let mut t = settings.initial_temperature;
    let mut dt = f64::INFINITY;
    let mut iterations = 0;

    while dt.abs() > settings.tolerance && iterations < settings.max_iterations {
        let (h, cp) = eval(t)?;
        iterations += 1;

        dt = (h_target - h) / cp;
        if !dt.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "non-finite Newton step in temperature inversion",
            });
        }
        t += dt;

        if t < 0.0 {
            tracing::warn!(
                h_target,
                temperature = t,
                iterations,
                "negative temperature during Newton-Raphson temperature inversion"
            );
            return Ok(TemperatureSolution {
                temperature: k(t),
                iterations,
                outcome: SolveOutcome::DivergedNegativeTemperature,
            });
        }
    }

    let outcome = if dt.abs() <= settings.tolerance {
        SolveOutcome::Converged
    } else {
        tracing::warn!(
            h_target,
            temperature = t,
            last_step = dt,
            iterations,
            "Newton-Raphson exceeded the iteration limit in temperature inversion"
        );
        SolveOutcome::MaxIterExceeded
    };

    Ok(TemperatureSolution {
        temperature: k(t),
        iterations,
        outcome,
    })
}
