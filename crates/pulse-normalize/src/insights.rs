//! The shared normalized output shape.
//!
//! Every platform normalizer produces a [`NormalizedInsights`]: the same
//! top-level structure regardless of source, with platform-idiosyncratic
//! metrics confined to the tagged [`PlatformEngagement`] variant. All
//! percentage fields are floats in `[0, 100]`; all counts are
//! non-negative integers. The whole tree is JSON-serializable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_core::{DataQuality, Platform};
use serde::{Deserialize, Serialize};

use crate::payload::GrowthSection;

/// Normalized analysis of one platform's raw payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedInsights {
    pub platform: Platform,
    pub demographics: Demographics,
    pub activity: Activity,
    pub engagement: PlatformEngagement,
    pub content: ContentPerformance,
    pub growth: Option<GrowthSection>,
    pub summary: PlatformSummary,
    pub collected_at: Option<DateTime<Utc>>,
}

/// Audience composition as percentage distributions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Demographics {
    pub age_distribution: BTreeMap<String, f64>,
    pub gender_distribution: BTreeMap<String, f64>,
    /// Combined age×gender shares, where the platform reports the matrix.
    pub age_gender_distribution: BTreeMap<String, f64>,
    pub geography_distribution: BTreeMap<String, f64>,
    pub device_distribution: BTreeMap<String, f64>,
    pub os_distribution: BTreeMap<String, f64>,
    pub language_distribution: BTreeMap<String, f64>,
    pub total_audience: u64,
}

/// When the audience is active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    /// Share of activity per hour label.
    pub hourly_distribution: BTreeMap<String, f64>,
    /// Share of activity per weekday label.
    pub weekly_distribution: BTreeMap<String, f64>,
    /// Top three hours by activity share, descending, label tie-break.
    pub peak_times: Vec<(String, f64)>,
}

/// Top- and low-performing content, for recommendation building.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPerformance {
    pub top_items: Vec<ContentItem>,
    pub low_items: Vec<ContentItem>,
    /// Most frequent topic tokens across content, descending.
    pub top_topics: Vec<(String, u64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    pub content_type: Option<String>,
    pub length_secs: Option<u64>,
    pub publish_hour: Option<u32>,
    pub topics: Vec<String>,
    pub engagement: f64,
    pub url: Option<String>,
}

/// Audience size plus the payload's data-quality assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub total_audience: u64,
    pub data_quality: DataQuality,
}

/// Platform-idiosyncratic engagement metrics.
///
/// Every variant exposes the same overall rate through
/// [`overall_rate`](Self::overall_rate), so the summary builder treats
/// all five platforms uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PlatformEngagement {
    Twitter(TwitterEngagementMetrics),
    Instagram(InstagramEngagementMetrics),
    TikTok(TikTokEngagementMetrics),
    YouTube(YouTubeEngagementMetrics),
    Reddit(RedditEngagementMetrics),
}

impl PlatformEngagement {
    /// Overall engagement rate as a percentage of the audience.
    #[must_use]
    pub fn overall_rate(&self) -> f64 {
        match self {
            PlatformEngagement::Twitter(m) => m.overall_engagement_rate,
            PlatformEngagement::Instagram(m) => m.overall_engagement_rate,
            PlatformEngagement::TikTok(m) => m.overall_engagement_rate,
            PlatformEngagement::YouTube(m) => m.overall_engagement_rate,
            PlatformEngagement::Reddit(m) => m.overall_engagement_rate,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterEngagementMetrics {
    pub overall_engagement_rate: f64,
    /// Per-interaction-type rates (likes, retweets, replies, quotes).
    pub engagement_by_type: BTreeMap<String, f64>,
    pub conversation: ConversationMetrics,
    /// Interest topic shares, percentages.
    pub interest_topics: BTreeMap<String, f64>,
    pub interest_clusters: BTreeMap<String, InterestCluster>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMetrics {
    pub reply_rate: f64,
    pub mentions_received: u64,
    pub conversation_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterestCluster {
    pub size: u64,
    pub main_topics: Vec<String>,
    pub engagement_rate: f64,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstagramEngagementMetrics {
    pub overall_engagement_rate: f64,
    pub follower_growth_rate: f64,
    /// Top ten audience interests by count, descending.
    pub top_interests: Vec<(String, u64)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TikTokEngagementMetrics {
    pub overall_engagement_rate: f64,
    /// Completion/loop/share rates per content type.
    pub by_content_type: BTreeMap<String, ContentTypeEngagement>,
    pub engagement_windows: EngagementWindows,
    pub viral_potential: ViralPotential,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentTypeEngagement {
    pub engagement_rate: f64,
    pub completion_rate: f64,
    pub loop_rate: f64,
    pub share_rate: f64,
}

/// Hour labels grouped by how close their activity is to the peak hour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementWindows {
    /// Hours at ≥ 80% of the peak hour's activity.
    pub prime_time: Vec<String>,
    /// Hours at ≥ 50% of the peak hour's activity.
    pub secondary_time: Vec<String>,
    pub low_activity: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViralPotential {
    /// Weighted blend of share/save/completion rates and velocity,
    /// capped at 100.
    pub score: f64,
    pub is_trending: bool,
    pub level: ViralLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViralLevel {
    High,
    Medium,
    #[default]
    Low,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YouTubeEngagementMetrics {
    pub overall_engagement_rate: f64,
    /// Interaction-type shares, percentages.
    pub interaction_distribution: BTreeMap<String, f64>,
    /// Top five interaction types by count, descending.
    pub top_interactions: Vec<(String, u64)>,
    pub subscribers: SubscriberMetrics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriberMetrics {
    pub subscribed_pct: f64,
    pub non_subscribed_pct: f64,
    pub conversion_rate: f64,
    pub net_change: i64,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditEngagementMetrics {
    pub overall_engagement_rate: f64,
    pub community: CommunityMetrics,
    pub posting: PostingPatterns,
}

/// Subreddit community health and growth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityMetrics {
    pub growth_rate: CommunityGrowth,
    pub community_health: CommunityHealth,
    /// Empty while no health threshold is breached.
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityGrowth {
    pub subscribers: u64,
    pub active_users: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityHealth {
    pub status: CommunityHealthStatus,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunityHealthStatus {
    Healthy,
    AtRisk,
    #[default]
    Unhealthy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingPatterns {
    /// Post counts by kind (`text` vs `link`).
    pub post_types: BTreeMap<String, u64>,
    /// Post counts by weekday label.
    pub weekly_activity: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_variants_expose_a_uniform_rate() {
        let twitter = PlatformEngagement::Twitter(TwitterEngagementMetrics {
            overall_engagement_rate: 2.5,
            ..Default::default()
        });
        let reddit = PlatformEngagement::Reddit(RedditEngagementMetrics {
            overall_engagement_rate: 0.15,
            ..Default::default()
        });
        assert!((twitter.overall_rate() - 2.5).abs() < f64::EPSILON);
        assert!((reddit.overall_rate() - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn health_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&CommunityHealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&CommunityHealthStatus::AtRisk).unwrap(),
            "\"at_risk\""
        );
    }
}
