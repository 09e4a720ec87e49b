//! Chemistry backend capability.
//!
//! The engine never evaluates kinetics or thermodynamic polynomials itself.
//! It pushes (T, P, Y) into a backend and reads scalars and per-species
//! vectors back, always in the backend's own species ordering. Species are
//! located by name once, at construction.
//!
//! All molar quantities use kmol (molecular weights in kg/kmol, enthalpies
//! in J/kmol, concentrations in kmol/m³).

use crate::error::FluidResult;

/// Stateful chemistry backend owned by exactly one engine instance.
///
/// Implementations hold the current thermodynamic state; every query
/// reflects the last successful [`ChemistryBackend::set_state_tpy`] call.
pub trait ChemistryBackend: Send {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Phase the mechanism was loaded for (e.g. "gas").
    fn phase(&self) -> &str;

    fn n_species(&self) -> usize;

    fn n_reactions(&self) -> usize;

    /// Resolve a species name to the backend's internal index.
    fn species_index(&self, name: &str) -> Option<usize>;

    /// Molecular weights in backend order [kg/kmol].
    fn molecular_weights(&self) -> &[f64];

    /// Set temperature [K], pressure [Pa] and mass fractions (backend order).
    fn set_state_tpy(&mut self, t: f64, p: f64, y: &[f64]) -> FluidResult<()>;

    /// Current temperature [K].
    fn temperature(&self) -> f64;

    /// Mixture density [kg/m³].
    fn density(&self) -> f64;

    /// Mixture specific enthalpy [J/kg].
    fn enthalpy_mass(&self) -> f64;

    /// Mixture cp [J/(kg·K)].
    fn cp_mass(&self) -> f64;

    /// Mixture cv [J/(kg·K)].
    fn cv_mass(&self) -> f64;

    /// Universal gas constant times temperature [J/kmol].
    fn rt(&self) -> f64;

    /// Mixture dynamic viscosity [Pa·s].
    fn viscosity(&self) -> f64;

    /// Mixture thermal conductivity [W/(m·K)].
    fn thermal_conductivity(&self) -> f64;

    /// Mixture-averaged mass diffusion coefficients [m²/s], backend order.
    fn mix_diff_coeffs_mass(&self, out: &mut [f64]);

    /// Net rate of progress of each reaction [kmol/(m³·s)].
    fn net_rates_of_progress(&self, out: &mut [f64]);

    /// Net stoichiometric coefficient (products minus reactants).
    fn net_stoich_coeff(&self, species: usize, reaction: usize) -> f64;

    /// Partial molar enthalpies [J/kmol], backend order.
    fn partial_molar_enthalpies(&self, out: &mut [f64]);

    /// Reference-state enthalpies H°/RT (dimensionless), backend order.
    fn enthalpy_rt_ref(&self, out: &mut [f64]);

    /// Reference-state heat capacities Cp°/R (dimensionless), backend order.
    fn cp_r_ref(&self, out: &mut [f64]);
}

impl<B: ChemistryBackend + ?Sized> ChemistryBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn phase(&self) -> &str {
        (**self).phase()
    }

    fn n_species(&self) -> usize {
        (**self).n_species()
    }

    fn n_reactions(&self) -> usize {
        (**self).n_reactions()
    }

    fn species_index(&self, name: &str) -> Option<usize> {
        (**self).species_index(name)
    }

    fn molecular_weights(&self) -> &[f64] {
        (**self).molecular_weights()
    }

    fn set_state_tpy(&mut self, t: f64, p: f64, y: &[f64]) -> FluidResult<()> {
        (**self).set_state_tpy(t, p, y)
    }

    fn temperature(&self) -> f64 {
        (**self).temperature()
    }

    fn density(&self) -> f64 {
        (**self).density()
    }

    fn enthalpy_mass(&self) -> f64 {
        (**self).enthalpy_mass()
    }

    fn cp_mass(&self) -> f64 {
        (**self).cp_mass()
    }

    fn cv_mass(&self) -> f64 {
        (**self).cv_mass()
    }

    fn rt(&self) -> f64 {
        (**self).rt()
    }

    fn viscosity(&self) -> f64 {
        (**self).viscosity()
    }

    fn thermal_conductivity(&self) -> f64 {
        (**self).thermal_conductivity()
    }

    fn mix_diff_coeffs_mass(&self, out: &mut [f64]) {
        (**self).mix_diff_coeffs_mass(out)
    }

    fn net_rates_of_progress(&self, out: &mut [f64]) {
        (**self).net_rates_of_progress(out)
    }

    fn net_stoich_coeff(&self, species: usize, reaction: usize) -> f64 {
        (**self).net_stoich_coeff(species, reaction)
    }

    fn partial_molar_enthalpies(&self, out: &mut [f64]) {
        (**self).partial_molar_enthalpies(out)
    }

    fn enthalpy_rt_ref(&self, out: &mut [f64]) {
        (**self).enthalpy_rt_ref(out)
    }

    fn cp_r_ref(&self, out: &mut [f64]) {
        (**self).cp_r_ref(out)
    }
}
