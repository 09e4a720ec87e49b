//! Species composition built from transported mass fractions.
//!
//! An outer solver transports n−1 mass fractions; the n-th (balance) species
//! is always `1 − Σ(others)` and is never transported.

use crate::error::{FluidError, FluidResult};
use rf_config::BalancePolicyDef;
use rf_core::numeric::{ensure_finite, ensure_len};
use std::fmt;

/// Handling of transported fractions whose sum exceeds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalancePolicy {
    /// Pass the (negative) balance fraction through to the backend unchanged.
    #[default]
    Propagate,
    /// Reject the composition with [`FluidError::NonPhysical`].
    Reject,
}

impl From<BalancePolicyDef> for BalancePolicy {
    fn from(def: BalancePolicyDef) -> Self {
        match def {
            BalancePolicyDef::Propagate => BalancePolicy::Propagate,
            BalancePolicyDef::Reject => BalancePolicy::Reject,
        }
    }
}

/// Slack allowed above a unit sum before [`BalancePolicy::Reject`] triggers.
const BALANCE_SLACK: f64 = 1e-12;

/// Ordered species-name → mass-fraction mapping with a derived balance species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesComposition {
    names: Vec<String>,
    fractions: Vec<f64>,
}

impl SpeciesComposition {
    /// Composition over `names`, initialised to pure balance species.
    pub fn new(names: Vec<String>) -> FluidResult<Self> {
        if names.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "empty species list",
            });
        }
        let mut fractions = vec![0.0; names.len()];
        if let Some(balance) = fractions.last_mut() {
            *balance = 1.0;
        }
        Ok(Self { names, fractions })
    }

    /// Build a composition directly from n−1 transported fractions.
    pub fn from_transported(
        names: Vec<String>,
        transported: &[f64],
        policy: BalancePolicy,
    ) -> FluidResult<Self> {
        let mut comp = Self::new(names)?;
        comp.update(transported, policy)?;
        Ok(comp)
    }

    /// Overwrite the composition from n−1 transported mass fractions.
    ///
    /// The balance entry becomes `1 − Σ(transported)`. On error the
    /// previous fractions are left untouched.
    pub fn update(&mut self, transported: &[f64], policy: BalancePolicy) -> FluidResult<()> {
        let n = self.fractions.len();
        ensure_len(transported, n - 1, "transported mass fractions")?;

        let mut sum = 0.0;
        for &y in transported {
            ensure_finite(y, "transported mass fraction")?;
            sum += y;
        }

        if policy == BalancePolicy::Reject && sum > 1.0 + BALANCE_SLACK {
            return Err(FluidError::NonPhysical {
                what: "transported mass fractions sum above one",
            });
        }

        self.fractions[..n - 1].copy_from_slice(transported);
        self.fractions[n - 1] = 1.0 - sum;
        Ok(())
    }

    /// Number of species, balance included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Name of the balance species.
    pub fn balance_species(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// Mass fraction of the balance species.
    pub fn balance(&self) -> f64 {
        self.fractions.last().copied().unwrap_or_default()
    }

    /// Mass fraction of a species by name (`None` if not tracked).
    pub fn mass_fraction(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.fractions[i])
    }

    /// Iterate over `(name, mass fraction)` pairs in species order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.fractions.iter().copied())
    }
}

impl fmt::Display for SpeciesComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, y)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", name, y)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rf_core::numeric::{Tolerances, nearly_equal};

    proptest! {
        #[test]
        fn fractions_sum_to_one(transported in prop::collection::vec(0.0_f64..0.3_f64, 0..6)) {
            let names: Vec<String> = (0..=transported.len()).map(|i| format!("S{i}")).collect();
            let comp = SpeciesComposition::from_transported(
                names,
                &transported,
                BalancePolicy::Propagate,
            ).unwrap();

            let sum: f64 = comp.fractions().iter().sum();
            let tol = Tolerances { abs: 1e-12, rel: 1e-12 };
            prop_assert!(nearly_equal(sum, 1.0, tol));

            let others: f64 = transported.iter().sum();
            prop_assert_eq!(comp.balance(), 1.0 - others);
            prop_assert_eq!(comp.len(), transported.len() + 1);
        }
    }
}
