//! Typed raw payloads, one shape per platform.
//!
//! Collectors hand over loosely structured nested mappings; parsing them
//! into these structs at the boundary keeps stringly-typed key lookups
//! out of the analysis logic. Every section is optional: a missing
//! section degrades to an empty sub-result downstream, it never fails the
//! parse.

use std::collections::BTreeMap;

use pulse_core::Platform;
use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::insights::NormalizedInsights;
use crate::platforms::{
    InstagramNormalizer, PlatformNormalizer, RedditNormalizer, TikTokNormalizer,
    TwitterNormalizer, YouTubeNormalizer,
};

/// A raw insight payload from one collection cycle, tagged by platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum RawInsightsPayload {
    Twitter(TwitterPayload),
    Instagram(InstagramPayload),
    TikTok(TikTokPayload),
    YouTube(YouTubePayload),
    Reddit(RedditPayload),
}

impl RawInsightsPayload {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            RawInsightsPayload::Twitter(_) => Platform::Twitter,
            RawInsightsPayload::Instagram(_) => Platform::Instagram,
            RawInsightsPayload::TikTok(_) => Platform::TikTok,
            RawInsightsPayload::YouTube(_) => Platform::YouTube,
            RawInsightsPayload::Reddit(_) => Platform::Reddit,
        }
    }

    /// Dispatches to the platform's normalizer. All five produce the same
    /// top-level shape, so callers never branch on the platform.
    #[must_use]
    pub fn normalize(&self) -> NormalizedInsights {
        match self {
            RawInsightsPayload::Twitter(p) => TwitterNormalizer.process_insights(p),
            RawInsightsPayload::Instagram(p) => InstagramNormalizer.process_insights(p),
            RawInsightsPayload::TikTok(p) => TikTokNormalizer.process_insights(p),
            RawInsightsPayload::YouTube(p) => YouTubeNormalizer.process_insights(p),
            RawInsightsPayload::Reddit(p) => RedditNormalizer.process_insights(p),
        }
    }

    /// Parses a platform-tagged JSON value into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::PayloadShape`] when the value lacks a
    /// `platform` tag or does not fit that platform's section shapes.
    pub fn from_json(value: serde_json::Value) -> Result<Self, NormalizeError> {
        Ok(serde_json::from_value(value)?)
    }
}

// ---------------------------------------------------------------------
// Sections shared by several platforms
// ---------------------------------------------------------------------

/// Hourly and weekly audience activity counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivitySection {
    #[serde(default)]
    pub hourly_activity: BTreeMap<String, u64>,
    #[serde(default)]
    pub weekly_activity: BTreeMap<String, u64>,
}

/// A metric observed in the current and the previous collection period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodPair {
    pub current: f64,
    pub previous: f64,
}

/// Period-over-period counters used for growth indicators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthSection {
    #[serde(default)]
    pub followers: Option<PeriodPair>,
    #[serde(default)]
    pub engagement: Option<PeriodPair>,
    #[serde(default)]
    pub views: Option<PeriodPair>,
}

/// Top- and low-performing content items as reported by a collector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default)]
    pub top_items: Vec<RawContentItem>,
    #[serde(default)]
    pub low_items: Vec<RawContentItem>,
}

/// One content item in a collector's performance listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawContentItem {
    pub title: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub length_secs: Option<u64>,
    #[serde(default)]
    pub publish_hour: Option<u32>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub engagement: f64,
    #[serde(default)]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------
// Twitter
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterPayload {
    #[serde(default)]
    pub follower_data: Option<TwitterFollowers>,
    #[serde(default)]
    pub activity_data: Option<ActivitySection>,
    #[serde(default)]
    pub engagement_data: Option<TwitterEngagementData>,
    #[serde(default)]
    pub interest_data: Option<TwitterInterests>,
    #[serde(default)]
    pub content_data: Option<ContentSection>,
    #[serde(default)]
    pub growth_data: Option<GrowthSection>,
    #[serde(default)]
    pub collected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterFollowers {
    #[serde(default)]
    pub age_groups: BTreeMap<String, u64>,
    #[serde(default)]
    pub gender: BTreeMap<String, u64>,
    #[serde(default)]
    pub languages: BTreeMap<String, u64>,
    #[serde(default)]
    pub countries: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_followers: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterEngagementData {
    #[serde(default)]
    pub total_interactions: u64,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub likes_rate: f64,
    #[serde(default)]
    pub retweet_rate: f64,
    #[serde(default)]
    pub reply_rate: f64,
    #[serde(default)]
    pub quote_rate: f64,
    #[serde(default)]
    pub mentions_received: u64,
    #[serde(default)]
    pub conversation_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterInterests {
    #[serde(default)]
    pub topics: BTreeMap<String, u64>,
    #[serde(default)]
    pub hashtags: BTreeMap<String, u64>,
    #[serde(default)]
    pub clusters: BTreeMap<String, RawInterestCluster>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInterestCluster {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub growth_rate: f64,
}

// ---------------------------------------------------------------------
// Instagram
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstagramPayload {
    #[serde(default)]
    pub demographics: Option<InstagramDemographics>,
    #[serde(default)]
    pub activity_data: Option<ActivitySection>,
    #[serde(default)]
    pub engagement_data: Option<InstagramEngagementData>,
    #[serde(default)]
    pub interest_data: Option<InstagramInterests>,
    #[serde(default)]
    pub content_data: Option<ContentSection>,
    #[serde(default)]
    pub growth_data: Option<GrowthSection>,
    #[serde(default)]
    pub collected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstagramDemographics {
    /// Combined gender×age matrix, keyed like `M.25-34`: the part before
    /// the separator is the gender code, the part after is the age range.
    #[serde(default)]
    pub gender_age: BTreeMap<String, u64>,
    #[serde(default)]
    pub countries: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_followers: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstagramEngagementData {
    #[serde(default)]
    pub total_interactions: u64,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub follower_growth_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstagramInterests {
    #[serde(default)]
    pub interests: BTreeMap<String, u64>,
}

// ---------------------------------------------------------------------
// TikTok
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TikTokPayload {
    #[serde(default)]
    pub user_data: Option<TikTokUsers>,
    #[serde(default)]
    pub activity_data: Option<ActivitySection>,
    #[serde(default)]
    pub engagement_data: Option<TikTokEngagementData>,
    #[serde(default)]
    pub content_data: Option<ContentSection>,
    #[serde(default)]
    pub growth_data: Option<GrowthSection>,
    #[serde(default)]
    pub collected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TikTokUsers {
    #[serde(default)]
    pub age_groups: BTreeMap<String, u64>,
    #[serde(default)]
    pub gender: BTreeMap<String, u64>,
    #[serde(default)]
    pub countries: BTreeMap<String, u64>,
    #[serde(default)]
    pub devices: BTreeMap<String, u64>,
    #[serde(default)]
    pub follower_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TikTokEngagementData {
    #[serde(default)]
    pub total_interactions: u64,
    #[serde(default)]
    pub follower_count: u64,
    /// Completion/loop/share statistics per content type.
    #[serde(default)]
    pub content_type_engagement: BTreeMap<String, TikTokContentTypeStats>,
    #[serde(default)]
    pub share_rate: f64,
    #[serde(default)]
    pub save_rate: f64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub engagement_velocity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TikTokContentTypeStats {
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub loop_rate: f64,
    #[serde(default)]
    pub share_rate: f64,
}

// ---------------------------------------------------------------------
// YouTube
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YouTubePayload {
    #[serde(default)]
    pub demographics: Option<YouTubeDemographics>,
    #[serde(default)]
    pub engagement_data: Option<YouTubeEngagementData>,
    #[serde(default)]
    pub content_data: Option<ContentSection>,
    #[serde(default)]
    pub growth_data: Option<GrowthSection>,
    #[serde(default)]
    pub collected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YouTubeDemographics {
    #[serde(default)]
    pub age_groups: BTreeMap<String, u64>,
    #[serde(default)]
    pub gender: BTreeMap<String, u64>,
    /// Combined age×gender viewer counts, keyed like `F.25-34`.
    #[serde(default)]
    pub age_gender_combined: BTreeMap<String, u64>,
    #[serde(default)]
    pub countries: BTreeMap<String, u64>,
    #[serde(default)]
    pub device_types: BTreeMap<String, u64>,
    #[serde(default)]
    pub operating_systems: BTreeMap<String, u64>,
    #[serde(default)]
    pub subscribers: Option<YouTubeSubscribers>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YouTubeSubscribers {
    #[serde(default)]
    pub total_subscribers: u64,
    #[serde(default)]
    pub total_viewers: u64,
    #[serde(default)]
    pub subscribed: u64,
    #[serde(default)]
    pub non_subscribed: u64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub net_change: i64,
    #[serde(default)]
    pub growth_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YouTubeEngagementData {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    /// Interaction counts by type, for the interaction distribution.
    #[serde(default)]
    pub interactions: BTreeMap<String, u64>,
}

// ---------------------------------------------------------------------
// Reddit
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditPayload {
    #[serde(default)]
    pub community_data: Option<RedditCommunity>,
    #[serde(default)]
    pub engagement_data: Option<RedditEngagementData>,
    #[serde(default)]
    pub content_data: Option<RedditContent>,
    #[serde(default)]
    pub growth_data: Option<GrowthSection>,
    #[serde(default)]
    pub collected_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditCommunity {
    #[serde(default)]
    pub subscribers: u64,
    #[serde(default)]
    pub active_users: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditEngagementData {
    /// Interactions per subscriber, already normalized by the collector.
    #[serde(default)]
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditContent {
    #[serde(default)]
    pub posts: Vec<RedditPost>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditPost {
    pub title: String,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub num_comments: u64,
    /// Unix seconds, as Reddit reports it.
    #[serde(default)]
    pub created_utc: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_self: bool,
}
