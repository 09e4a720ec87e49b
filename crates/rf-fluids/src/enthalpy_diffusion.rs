//! Differential-diffusion enthalpy coefficients.
//!
//! For every transported species `i` relative to the balance species `n`:
//!
//! ```text
//! coeff[i] = ρ · prefactor · (w[i]·D[i]/M[i] − w[n]·D[n]/M[n])
//! ```
//!
//! The value form uses `w = H°/RT` with prefactor `R·T`; the gradient form
//! uses `w = Cp°/R` with prefactor `R`.

use crate::error::FluidResult;
use rf_core::numeric::ensure_len;

/// Per-species inputs, all in backend-independent tracked-species order.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionWeights<'a> {
    /// Dimensionless reference weights (H°/RT or Cp°/R)
    pub weights: &'a [f64],
    /// Mass diffusivities [m²/s]
    pub diffusivity: &'a [f64],
    /// Molecular weights [kg/kmol]
    pub molar_mass: &'a [f64],
}

/// Fill `out` (length n−1) with the differential-diffusion coefficients.
pub fn enthalpy_diffusion_coefficients(
    density: f64,
    prefactor: f64,
    species: DiffusionWeights<'_>,
    out: &mut [f64],
) -> FluidResult<()> {
    let n = species.weights.len();
    ensure_len(species.diffusivity, n, "species diffusivities")?;
    ensure_len(species.molar_mass, n, "species molecular weights")?;
    ensure_len(out, n.saturating_sub(1), "enthalpy diffusivity output")?;
    if n == 0 {
        return Ok(());
    }

    let flux = |k: usize| species.weights[k] * species.diffusivity[k] / species.molar_mass[k];
    let balance = flux(n - 1);
    let scale = density * prefactor;
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = scale * (flux(i) - balance);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_species_by_hand() {
        let mut out = [0.0];
        enthalpy_diffusion_coefficients(
            0.5,
            2.0,
            DiffusionWeights {
                weights: &[3.0, 1.0],
                diffusivity: &[4.0, 2.0],
                molar_mass: &[2.0, 1.0],
            },
            &mut out,
        )
        .unwrap();
        // 0.5·2·(3·4/2 − 1·2/1) = 4
        assert_eq!(out, [4.0]);
    }

    #[test]
    fn identical_species_cancel() {
        let mut out = [1.0, 1.0];
        enthalpy_diffusion_coefficients(
            1.2,
            8314.0 * 900.0,
            DiffusionWeights {
                weights: &[5.0, 5.0, 5.0],
                diffusivity: &[2e-5, 2e-5, 2e-5],
                molar_mass: &[28.0, 28.0, 28.0],
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn single_species_has_no_coefficients() {
        let mut out: [f64; 0] = [];
        enthalpy_diffusion_coefficients(
            1.0,
            1.0,
            DiffusionWeights {
                weights: &[1.0],
                diffusivity: &[1.0],
                molar_mass: &[1.0],
            },
            &mut out,
        )
        .unwrap();
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut out = [0.0; 2];
        let result = enthalpy_diffusion_coefficients(
            1.0,
            1.0,
            DiffusionWeights {
                weights: &[1.0, 2.0],
                diffusivity: &[1.0, 2.0],
                molar_mass: &[1.0, 2.0],
            },
            &mut out,
        );
        assert!(result.is_err());
    }
}
