//! Platform-specific payload normalization.
//!
//! Raw insight payloads arrive as platform-shaped nested structures; this
//! crate parses them into typed payloads at the boundary and turns each
//! one into the shared [`NormalizedInsights`] shape (percentage
//! distributions, deterministic top-N rankings, and a data-quality
//! assessment) so downstream consumers never branch on the platform.

pub mod error;
pub mod insights;
pub mod payload;
pub mod platforms;

pub use error::NormalizeError;
pub use insights::{
    Activity, CommunityHealthStatus, ContentItem, ContentPerformance, Demographics,
    NormalizedInsights, PlatformEngagement, PlatformSummary,
};
pub use payload::RawInsightsPayload;
pub use platforms::PlatformNormalizer;
