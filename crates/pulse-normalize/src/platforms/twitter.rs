use std::collections::BTreeMap;

use pulse_core::{percentage_distribution, Platform};

use crate::insights::{
    ConversationMetrics, Demographics, InterestCluster, NormalizedInsights, PlatformEngagement,
    PlatformSummary, TwitterEngagementMetrics,
};
use crate::payload::TwitterPayload;

use super::{
    content_performance, engagement_rate, normalize_activity, parse_collected_at, section_quality,
    warn_missing, PlatformNormalizer,
};

/// Twitter/X: follower demographics with languages, per-interaction-type
/// rates, conversation metrics, and interest topic clusters.
pub struct TwitterNormalizer;

impl PlatformNormalizer for TwitterNormalizer {
    type Payload = TwitterPayload;

    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn process_insights(&self, payload: &Self::Payload) -> NormalizedInsights {
        let platform = self.platform();

        let demographics = match &payload.follower_data {
            Some(followers) => Demographics {
                age_distribution: percentage_distribution(&followers.age_groups),
                gender_distribution: percentage_distribution(&followers.gender),
                geography_distribution: percentage_distribution(&followers.countries),
                language_distribution: percentage_distribution(&followers.languages),
                total_audience: followers.total_followers,
                ..Default::default()
            },
            None => {
                warn_missing(platform, "follower_data");
                Demographics::default()
            }
        };

        let mut metrics = TwitterEngagementMetrics::default();
        match &payload.engagement_data {
            Some(eng) => {
                metrics.overall_engagement_rate =
                    engagement_rate(eng.total_interactions, eng.follower_count);
                metrics.engagement_by_type = BTreeMap::from([
                    ("likes".to_string(), eng.likes_rate),
                    ("retweets".to_string(), eng.retweet_rate),
                    ("replies".to_string(), eng.reply_rate),
                    ("quotes".to_string(), eng.quote_rate),
                ]);
                metrics.conversation = ConversationMetrics {
                    reply_rate: eng.reply_rate,
                    mentions_received: eng.mentions_received,
                    conversation_rate: eng.conversation_rate,
                };
            }
            None => warn_missing(platform, "engagement_data"),
        }
        match &payload.interest_data {
            Some(interests) => {
                metrics.interest_topics = percentage_distribution(&interests.topics);
                metrics.interest_clusters = interests
                    .clusters
                    .iter()
                    .map(|(name, c)| {
                        (
                            name.clone(),
                            InterestCluster {
                                size: c.size,
                                main_topics: c.topics.clone(),
                                engagement_rate: c.engagement_rate,
                                growth_rate: c.growth_rate,
                            },
                        )
                    })
                    .collect();
            }
            None => warn_missing(platform, "interest_data"),
        }

        let data_quality = section_quality(&[
            ("follower_data", payload.follower_data.is_some()),
            ("activity_data", payload.activity_data.is_some()),
            ("engagement_data", payload.engagement_data.is_some()),
            ("interest_data", payload.interest_data.is_some()),
            ("content_data", payload.content_data.is_some()),
            ("growth_data", payload.growth_data.is_some()),
        ]);

        NormalizedInsights {
            platform,
            activity: normalize_activity(platform, payload.activity_data.as_ref()),
            engagement: PlatformEngagement::Twitter(metrics),
            content: content_performance(platform, payload.content_data.as_ref()),
            growth: payload.growth_data.clone(),
            summary: PlatformSummary {
                total_audience: demographics.total_audience,
                data_quality,
            },
            collected_at: parse_collected_at(platform, payload.collected_at.as_deref()),
            demographics,
        }
    }
}
