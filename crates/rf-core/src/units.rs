// rf-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type DynVisc = UomDynamicViscosity;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

pub mod constants {
    /// Universal gas constant [J/(kmol·K)].
    pub const R_UNIVERSAL: f64 = 8_314.462_618;

    /// Thermochemical reference temperature [K].
    pub const T_REF_K: f64 = 298.15;

    /// One standard atmosphere [Pa].
    pub const ONE_ATM_PA: f64 = 101_325.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _rho = kg_per_m3(1.2);
        let _mu = pa_s(1.8e-5);
    }

    #[test]
    fn constructors_store_si_values() {
        assert_eq!(k(1500.0).value, 1500.0);
        assert_eq!(pa(constants::ONE_ATM_PA).value, 101_325.0);
        assert_eq!(kg_per_m3(0.25).value, 0.25);
    }
}
