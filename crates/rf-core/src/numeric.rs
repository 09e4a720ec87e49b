use crate::RfError;

/// Floating point type used throughout the engine
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RfError::NonFinite { what, value: v })
    }
}

/// Check that a per-species slice has the length the caller was configured for.
pub fn ensure_len<T>(values: &[T], expected: usize, what: &'static str) -> Result<(), RfError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(RfError::LengthMismatch {
            what,
            expected,
            got: values.len(),
        })
    }
}
