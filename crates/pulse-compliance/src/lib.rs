//! Compliance gating for insight collection.
//!
//! Validates field selection and request cadence against per-platform
//! policy, anonymizes personally identifying columns, and filters records
//! that have aged out of the retention window. The gate degrades to
//! permissive defaults on configuration gaps; it never blocks an
//! otherwise-working pipeline with a hard failure.

pub mod anonymize;
pub mod error;
pub mod gate;
pub mod profile;

pub use anonymize::{hash_identifier, Row};
pub use error::ComplianceError;
pub use gate::ComplianceGate;
pub use profile::{ComplianceConfig, ComplianceProfile};
