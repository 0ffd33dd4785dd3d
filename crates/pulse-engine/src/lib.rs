//! The analysis engine: ties compliance gating, payload normalization,
//! and engagement scoring into per-platform reports, and runs batches of
//! platforms concurrently with per-platform failure isolation.

pub mod error;
pub mod health;
pub mod pipeline;
pub mod summary;

pub use error::EngineError;
pub use health::{EngagementHealth, HealthThresholds};
pub use pipeline::{analyze_batch, analyze_platform, AnalysisRequest, BatchItem, PlatformReport};
pub use summary::{build_insights_summary, ContentRecommendation, GrowthIndicators, InsightsSummary};
