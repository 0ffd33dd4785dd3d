//! Shared domain types for the audience & engagement analytics engine.
//!
//! Everything downstream (compliance gating, platform normalization,
//! engagement scoring, summary building) works in terms of the types
//! defined here: platforms, engagement records, percentage distributions,
//! top-N rankings, and data-quality assessments.

pub mod distribution;
pub mod platform;
pub mod quality;
pub mod records;

pub use distribution::{percentage_distribution, top_n};
pub use platform::{Platform, UnknownPlatform};
pub use quality::DataQuality;
pub use records::{EngagementRecord, InteractionKind};
