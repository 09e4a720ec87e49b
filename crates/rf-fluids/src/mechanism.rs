//! Reaction mechanisms available to the built-in backend.
//!
//! Mechanisms are assembled in code and looked up by locator; no mechanism
//! file format is read.

use crate::error::{FluidError, FluidResult};
use crate::species::{Species, SpeciesData};

/// Modified Arrhenius rate constant `k = A·T^β·exp(−Ea/(R·T))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConstant {
    /// Pre-exponential factor (kmol, m³, s units consistent with the orders)
    pub preexponential_factor: f64,
    pub temperature_exponent: f64,
    /// Activation energy [J/kmol]
    pub activation_energy: f64,
}

/// Irreversible reaction with mass-action concentration orders.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub equation: String,
    /// (species index, stoichiometric coefficient)
    pub reactants: Vec<(usize, f64)>,
    pub products: Vec<(usize, f64)>,
    /// (species index, concentration exponent) used in the rate law
    pub orders: Vec<(usize, f64)>,
    pub rate_constant: RateConstant,
}

impl Reaction {
    /// Net stoichiometric coefficient of `species` (products minus reactants).
    pub fn net_stoich(&self, species: usize) -> f64 {
        let sum = |side: &[(usize, f64)]| -> f64 {
            side.iter()
                .filter(|(k, _)| *k == species)
                .map(|(_, nu)| nu)
                .sum()
        };
        sum(&self.products) - sum(&self.reactants)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mechanism {
    pub name: String,
    pub phase: String,
    pub species: Vec<SpeciesData>,
    pub reactions: Vec<Reaction>,
}

impl Mechanism {
    /// Resolve a mechanism locator to a built-in mechanism.
    pub fn from_locator(locator: &str) -> FluidResult<Self> {
        match locator.trim() {
            "single-step-fuel" => Self::single_step_fuel(),
            "methane-one-step" => Self::methane_one_step(),
            "inert-air" => Self::inert_air(),
            other => Err(FluidError::UnknownMechanism {
                locator: other.to_string(),
            }),
        }
    }

    /// FUEL → PROD, first order in fuel, ~3.4 MJ/kg released.
    pub fn single_step_fuel() -> FluidResult<Self> {
        let mut builder = MechanismBuilder::new("single-step-fuel", &[Species::Fuel, Species::Product]);
        builder.reaction(
            "FUEL => PROD",
            &[(Species::Fuel, 1.0)],
            &[(Species::Product, 1.0)],
            &[(Species::Fuel, 1.0)],
            RateConstant {
                preexponential_factor: 1.0e9,
                temperature_exponent: 0.0,
                activation_energy: 1.2e8,
            },
        )?;
        Ok(builder.build())
    }

    /// Global methane oxidation CH4 + 2 O2 => CO2 + 2 H2O in nitrogen.
    pub fn methane_one_step() -> FluidResult<Self> {
        let mut builder = MechanismBuilder::new(
            "methane-one-step",
            &[Species::CH4, Species::O2, Species::CO2, Species::H2O, Species::N2],
        );
        builder.reaction(
            "CH4 + 2 O2 => CO2 + 2 H2O",
            &[(Species::CH4, 1.0), (Species::O2, 2.0)],
            &[(Species::CO2, 1.0), (Species::H2O, 2.0)],
            &[(Species::CH4, 1.0), (Species::O2, 1.0)],
            RateConstant {
                preexponential_factor: 2.0e12,
                temperature_exponent: 0.0,
                activation_energy: 2.0e8,
            },
        )?;
        Ok(builder.build())
    }

    /// Oxygen and nitrogen without reactions.
    pub fn inert_air() -> FluidResult<Self> {
        Ok(MechanismBuilder::new("inert-air", &[Species::O2, Species::N2]).build())
    }

    pub fn species_index(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s.name == name)
    }
}

struct MechanismBuilder {
    name: &'static str,
    species: Vec<Species>,
    reactions: Vec<Reaction>,
}

impl MechanismBuilder {
    fn new(name: &'static str, species: &[Species]) -> Self {
        Self {
            name,
            species: species.to_vec(),
            reactions: Vec::new(),
        }
    }

    fn index_of(&self, species: Species) -> FluidResult<usize> {
        self.species
            .iter()
            .position(|s| *s == species)
            .ok_or_else(|| FluidError::UnknownSpecies {
                name: species.key().to_string(),
                mechanism: self.name.to_string(),
            })
    }

    fn indexed(&self, side: &[(Species, f64)]) -> FluidResult<Vec<(usize, f64)>> {
        side.iter()
            .map(|(s, nu)| Ok((self.index_of(*s)?, *nu)))
            .collect()
    }

    fn reaction(
        &mut self,
        equation: &str,
        reactants: &[(Species, f64)],
        products: &[(Species, f64)],
        orders: &[(Species, f64)],
        rate_constant: RateConstant,
    ) -> FluidResult<()> {
        let reaction = Reaction {
            equation: equation.to_string(),
            reactants: self.indexed(reactants)?,
            products: self.indexed(products)?,
            orders: self.indexed(orders)?,
            rate_constant,
        };
        self.reactions.push(reaction);
        Ok(())
    }

    fn build(self) -> Mechanism {
        Mechanism {
            name: self.name.to_string(),
            phase: "gas".to_string(),
            species: self.species.iter().map(Species::data).collect(),
            reactions: self.reactions,
        }
    }
}
