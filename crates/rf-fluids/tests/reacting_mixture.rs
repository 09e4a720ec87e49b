//! Reacting-mixture engine driven by the built-in mechanism backend.
//!
//! Physical values are checked against the backend itself or for sign and
//! trend, so the tests stay valid if the mechanism data is retuned.

use rf_config::{FluidModelDef, ReactingMixtureDef, parse_yaml};
use rf_core::units::k;
use rf_fluids::{
    ChemistryBackend, FluidModel, MechanismBackend, ReactingMixture, SolveOutcome,
};

fn reacting_def(yaml: &str) -> ReactingMixtureDef {
    match parse_yaml(yaml).unwrap().model {
        FluidModelDef::ReactingMixture(def) => def,
        other => panic!("expected a reacting mixture, got {other:?}"),
    }
}

fn premixed() -> ReactingMixtureDef {
    reacting_def(
        r#"
name: premixed
model:
  type: reacting_mixture
  species: [FUEL, PROD]
  mechanism: single-step-fuel
  operating_pressure_pa: 101325.0
"#,
    )
}

fn air() -> ReactingMixtureDef {
    reacting_def(
        r#"
name: air
model:
  type: reacting_mixture
  species: [O2, N2]
  mechanism: inert-air
  operating_pressure_pa: 101325.0
"#,
    )
}

#[test]
fn premixed_fuel_at_1500k() {
    let mut mix = ReactingMixture::from_def(&premixed()).unwrap();
    mix.set_state(k(1500.0), &[0.05]).unwrap();

    let mut reference = MechanismBackend::from_locator(
        "single-step-fuel",
        rf_config::TransportModelDef::MixtureAveraged,
    )
    .unwrap();
    reference
        .set_state_tpy(1500.0, 101_325.0, &[0.05, 0.95])
        .unwrap();

    assert_eq!(mix.density().value, reference.density());
    assert_eq!(mix.cp(), reference.cp_mass());
    assert_eq!(mix.cv(), reference.cv_mass());
    assert_eq!(mix.enthalpy(), reference.enthalpy_mass());
    assert_eq!(mix.viscosity().value, reference.viscosity());
    assert_eq!(mix.conductivity(), reference.thermal_conductivity());

    assert_eq!(mix.mass_diffusivity().len(), 2);
    let mut d = [0.0; 2];
    reference.mix_diff_coeffs_mass(&mut d);
    assert_eq!(mix.mass_diffusivity(), &d);

    assert!(mix.heat_release() > 0.0, "heat release {}", mix.heat_release());
    // Fuel is consumed, product formed, mass conserved.
    let w = mix.source_terms();
    assert!(w[0] < 0.0);
    assert!(w[1] > 0.0);
    assert!((w[0] + w[1]).abs() <= 1e-9 * w[1].abs());
}

#[test]
fn set_state_is_deterministic() {
    let mut mix = ReactingMixture::from_def(&premixed()).unwrap();
    mix.set_state(k(1400.0), &[0.08]).unwrap();
    let thermo = mix.thermo().clone();
    let transport = mix.transport().clone();
    let sources = mix.sources().clone();

    mix.set_state(k(600.0), &[0.5]).unwrap();
    mix.set_state(k(1400.0), &[0.08]).unwrap();

    assert_eq!(mix.thermo(), &thermo);
    assert_eq!(mix.transport(), &transport);
    assert_eq!(mix.sources(), &sources);
}

#[test]
fn temperature_round_trip() {
    let mut mix = ReactingMixture::from_def(&premixed()).unwrap();
    for (t_star, y) in [(350.0, 0.02), (900.0, 0.05), (1500.0, 0.05), (2600.0, 0.0)] {
        mix.set_state(k(t_star), &[y]).unwrap();
        let h = mix.enthalpy();
        let sol = mix.temperature_from_enthalpy(h, &[y]).unwrap();
        assert_eq!(sol.outcome, SolveOutcome::Converged);
        assert!(
            (sol.temperature.value - t_star).abs() <= 1e-3,
            "T* = {t_star}, got {}",
            sol.temperature.value
        );
        assert!(sol.iterations <= 20);
    }
}

#[test]
fn enthalpy_far_below_minimum_stops_early() {
    let mut mix = ReactingMixture::from_def(&premixed()).unwrap();
    let sol = mix.temperature_from_enthalpy(-1.0e9, &[0.05]).unwrap();
    assert_eq!(sol.outcome, SolveOutcome::DivergedNegativeTemperature);
    assert!(sol.iterations < 20);
    assert!(sol.temperature.value < 0.0);
}

#[test]
fn inert_composition_releases_no_heat() {
    let mut mix = ReactingMixture::from_def(&air()).unwrap();
    mix.set_state(k(1800.0), &[0.23]).unwrap();
    assert_eq!(mix.heat_release(), 0.0);
    assert!(mix.source_terms().iter().all(|&w| w == 0.0));
    assert_eq!(mix.source_terms().len(), 2);

    // No fuel left in the reacting mechanism behaves the same way.
    let mut burnt = ReactingMixture::from_def(&premixed()).unwrap();
    burnt.set_state(k(1800.0), &[0.0]).unwrap();
    assert_eq!(burnt.heat_release(), 0.0);
    assert!(burnt.source_terms().iter().all(|&w| w == 0.0));
}

#[test]
fn vectors_keep_species_length() {
    let def = reacting_def(
        r#"
name: methane
model:
  type: reacting_mixture
  species: [CH4, O2, CO2, H2O, N2]
  mechanism: methane-one-step
  operating_pressure_pa: 101325.0
"#,
    );
    let mut mix = ReactingMixture::from_def(&def).unwrap();
    for t in [500.0, 1200.0, 2000.0] {
        mix.set_state(k(t), &[0.04, 0.2, 0.01, 0.02]).unwrap();
        assert_eq!(mix.mass_diffusivity().len(), 5);
        assert_eq!(mix.source_terms().len(), 5);
        assert_eq!(mix.enthalpy_diffusivity().unwrap().len(), 4);
        assert_eq!(mix.grad_enthalpy_diffusivity().unwrap().len(), 4);
    }
    assert!(mix.heat_release() > 0.0);
}

#[test]
fn oversum_propagates_into_backend_by_default() {
    let mut mix = ReactingMixture::from_def(&premixed()).unwrap();
    mix.set_state(k(1000.0), &[1.02]).unwrap();
    assert!(mix.composition().balance() < 0.0);
}
