//! Engagement scoring over normalized engagement records.
//!
//! Three independent views of the same record set: sentiment-bucketed
//! engagement, contextually grouped weighted engagement, and hourly
//! velocity/acceleration. Each operation returns `None` (with an ERROR
//! log) when there is nothing to analyze; callers treat that as "no
//! data", never as a crash.

pub mod scorer;
pub mod sentiment;
pub mod velocity;

pub use scorer::{
    analyze_sentiment_engagement, contextual_engagement, engagement_summary, ContextualMetrics,
    EngagementSummary, SentimentMetrics,
};
pub use sentiment::{LexiconModel, SentimentCategory, SentimentModel};
pub use velocity::{engagement_velocity, VelocityMetrics};
