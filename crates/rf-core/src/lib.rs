//! rf-core: stable foundation for reactflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - timing (opt-in accumulating timers for the property hot path)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::RfError;
pub use numeric::*;
pub use units::*;
