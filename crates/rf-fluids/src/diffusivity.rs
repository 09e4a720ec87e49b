//! Per-species mass-diffusivity laws.

use crate::state::MassDiffusivity;
use rf_config::DiffusivityLawDef;

/// Local mixture properties a diffusivity law may depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransport {
    /// [kg/m³]
    pub density: f64,
    /// [Pa·s]
    pub viscosity: f64,
    /// [W/(m·K)]
    pub conductivity: f64,
    /// [J/(kg·K)]
    pub cp: f64,
}

/// Diffusivity law for one species, chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MassDiffusivityModel {
    /// Fixed value [m²/s].
    Constant { value: f64 },
    /// D = μ / (ρ·Sc).
    ConstantSchmidt { schmidt: f64 },
    /// D = k / (ρ·cp).
    UnityLewis,
    /// Backend mixture-averaged coefficient.
    MixtureAveraged,
}

impl MassDiffusivityModel {
    /// Whether this law needs the backend's mixture-averaged coefficients.
    pub fn uses_backend(&self) -> bool {
        matches!(self, MassDiffusivityModel::MixtureAveraged)
    }

    /// Evaluate the law. `mixture_averaged` is only read by the backend law.
    pub fn evaluate(&self, local: &LocalTransport, mixture_averaged: f64) -> MassDiffusivity {
        match *self {
            MassDiffusivityModel::Constant { value } => value,
            MassDiffusivityModel::ConstantSchmidt { schmidt } => {
                local.viscosity / (local.density * schmidt)
            }
            MassDiffusivityModel::UnityLewis => local.conductivity / (local.density * local.cp),
            MassDiffusivityModel::MixtureAveraged => mixture_averaged,
        }
    }
}

impl From<&DiffusivityLawDef> for MassDiffusivityModel {
    fn from(def: &DiffusivityLawDef) -> Self {
        match *def {
            DiffusivityLawDef::Constant { value } => MassDiffusivityModel::Constant { value },
            DiffusivityLawDef::ConstantSchmidt { schmidt } => {
                MassDiffusivityModel::ConstantSchmidt { schmidt }
            }
            DiffusivityLawDef::UnityLewis => MassDiffusivityModel::UnityLewis,
            DiffusivityLawDef::MixtureAveraged => MassDiffusivityModel::MixtureAveraged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCAL: LocalTransport = LocalTransport {
        density: 0.5,
        viscosity: 4.0e-5,
        conductivity: 0.08,
        cp: 1200.0,
    };

    #[test]
    fn constant_ignores_state() {
        let law = MassDiffusivityModel::Constant { value: 2.0e-5 };
        assert_eq!(law.evaluate(&LOCAL, 9.9), 2.0e-5);
        assert!(!law.uses_backend());
    }

    #[test]
    fn schmidt_law() {
        let law = MassDiffusivityModel::ConstantSchmidt { schmidt: 0.8 };
        assert_eq!(law.evaluate(&LOCAL, 0.0), 4.0e-5 / (0.5 * 0.8));
    }

    #[test]
    fn unity_lewis_law() {
        let law = MassDiffusivityModel::UnityLewis;
        assert_eq!(law.evaluate(&LOCAL, 0.0), 0.08 / (0.5 * 1200.0));
    }

    #[test]
    fn backend_law_passes_through() {
        let law = MassDiffusivityModel::MixtureAveraged;
        assert!(law.uses_backend());
        assert_eq!(law.evaluate(&LOCAL, 3.3e-5), 3.3e-5);
    }

    #[test]
    fn built_from_config() {
        let def = DiffusivityLawDef::ConstantSchmidt { schmidt: 0.7 };
        assert_eq!(
            MassDiffusivityModel::from(&def),
            MassDiffusivityModel::ConstantSchmidt { schmidt: 0.7 }
        );
    }
}
