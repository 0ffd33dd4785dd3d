use pulse_core::{percentage_distribution, top_n, Platform};

use crate::insights::{
    Activity, Demographics, NormalizedInsights, PlatformEngagement, PlatformSummary,
    SubscriberMetrics, YouTubeEngagementMetrics,
};
use crate::payload::YouTubePayload;

use super::{
    content_performance, engagement_rate, parse_collected_at, section_quality, warn_missing,
    PlatformNormalizer,
};

/// YouTube: viewer demographics including devices and operating systems,
/// interaction distribution over views, and subscriber conversion.
pub struct YouTubeNormalizer;

impl PlatformNormalizer for YouTubeNormalizer {
    type Payload = YouTubePayload;

    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn process_insights(&self, payload: &Self::Payload) -> NormalizedInsights {
        let platform = self.platform();

        let mut subscriber_metrics = SubscriberMetrics::default();
        let demographics = match &payload.demographics {
            Some(demo) => {
                if let Some(subs) = &demo.subscribers {
                    subscriber_metrics = SubscriberMetrics {
                        subscribed_pct: engagement_rate(subs.subscribed, subs.subscribed + subs.non_subscribed),
                        non_subscribed_pct: engagement_rate(
                            subs.non_subscribed,
                            subs.subscribed + subs.non_subscribed,
                        ),
                        conversion_rate: subs.conversion_rate,
                        net_change: subs.net_change,
                        growth_rate: subs.growth_rate,
                    };
                }
                Demographics {
                    age_distribution: percentage_distribution(&demo.age_groups),
                    gender_distribution: percentage_distribution(&demo.gender),
                    age_gender_distribution: percentage_distribution(&demo.age_gender_combined),
                    geography_distribution: percentage_distribution(&demo.countries),
                    device_distribution: percentage_distribution(&demo.device_types),
                    os_distribution: percentage_distribution(&demo.operating_systems),
                    total_audience: demo
                        .subscribers
                        .as_ref()
                        .map_or(0, |s| s.total_subscribers),
                    ..Default::default()
                }
            }
            None => {
                warn_missing(platform, "demographics");
                Demographics::default()
            }
        };

        let mut metrics = YouTubeEngagementMetrics {
            subscribers: subscriber_metrics,
            ..Default::default()
        };
        match &payload.engagement_data {
            Some(eng) => {
                metrics.overall_engagement_rate =
                    engagement_rate(eng.likes + eng.comments + eng.shares, eng.views);
                metrics.interaction_distribution = percentage_distribution(&eng.interactions);
                metrics.top_interactions = top_n(&eng.interactions, 5);
            }
            None => warn_missing(platform, "engagement_data"),
        }

        let data_quality = section_quality(&[
            ("demographics", payload.demographics.is_some()),
            ("engagement_data", payload.engagement_data.is_some()),
            ("content_data", payload.content_data.is_some()),
            ("growth_data", payload.growth_data.is_some()),
        ]);

        NormalizedInsights {
            platform,
            // No activity section in this payload shape.
            activity: Activity::default(),
            engagement: PlatformEngagement::YouTube(metrics),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{YouTubeDemographics, YouTubeEngagementData, YouTubeSubscribers};

    fn payload() -> YouTubePayload {
        YouTubePayload {
            demographics: Some(YouTubeDemographics {
                age_groups: [("18-24".to_string(), 400), ("25-34".to_string(), 600)].into(),
                device_types: [("mobile".to_string(), 700), ("tv".to_string(), 300)].into(),
                operating_systems: [("android".to_string(), 500), ("ios".to_string(), 500)].into(),
                subscribers: Some(YouTubeSubscribers {
                    total_subscribers: 20_000,
                    total_viewers: 50_000,
                    subscribed: 30_000,
                    non_subscribed: 20_000,
                    conversion_rate: 2.5,
                    net_change: 150,
                    growth_rate: 0.8,
                }),
                ..Default::default()
            }),
            engagement_data: Some(YouTubeEngagementData {
                views: 100_000,
                likes: 4000,
                comments: 800,
                shares: 200,
                interactions: [
                    ("likes".to_string(), 4000),
                    ("comments".to_string(), 800),
                    ("shares".to_string(), 200),
                ]
                .into(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn overall_rate_is_interactions_over_views() {
        let insights = YouTubeNormalizer.process_insights(&payload());
        assert!((insights.engagement.overall_rate() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn subscriber_split_is_a_percentage_of_viewers() {
        let insights = YouTubeNormalizer.process_insights(&payload());
        match insights.engagement {
            PlatformEngagement::YouTube(m) => {
                assert!((m.subscribers.subscribed_pct - 60.0).abs() < 1e-9);
                assert!((m.subscribers.non_subscribed_pct - 40.0).abs() < 1e-9);
                assert_eq!(m.subscribers.net_change, 150);
                assert_eq!(m.top_interactions[0].0, "likes");
            }
            other => panic!("expected youtube metrics, got {other:?}"),
        }
    }

    #[test]
    fn device_and_os_breakdowns_are_distributions() {
        let insights = YouTubeNormalizer.process_insights(&payload());
        assert!((insights.demographics.device_distribution["mobile"] - 70.0).abs() < 1e-9);
        assert!((insights.demographics.os_distribution["android"] - 50.0).abs() < 1e-9);
        assert_eq!(insights.summary.total_audience, 20_000);
    }
}
