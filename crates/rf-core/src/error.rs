use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Length mismatch for {what} (expected={expected}, got={got})")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
}
