use std::collections::BTreeMap;

use pulse_core::{percentage_distribution, top_n, Platform};
use tracing::warn;

use crate::insights::{
    Demographics, InstagramEngagementMetrics, NormalizedInsights, PlatformEngagement,
    PlatformSummary,
};
use crate::payload::InstagramPayload;

use super::{
    content_performance, engagement_rate, normalize_activity, parse_collected_at, section_quality,
    warn_missing, PlatformNormalizer,
};

/// Instagram: a combined gender×age matrix split into separate
/// distributions, follower growth, and audience interests.
pub struct InstagramNormalizer;

/// Splits `M.25-34` style keys into marginal gender and age counts.
/// Keys without the separator are logged and skipped.
fn split_gender_age(
    matrix: &BTreeMap<String, u64>,
) -> (BTreeMap<String, u64>, BTreeMap<String, u64>) {
    let mut gender: BTreeMap<String, u64> = BTreeMap::new();
    let mut age: BTreeMap<String, u64> = BTreeMap::new();
    for (key, count) in matrix {
        match key.split_once('.') {
            Some((g, a)) if !g.is_empty() && !a.is_empty() => {
                *gender.entry(g.to_string()).or_insert(0) += count;
                *age.entry(a.to_string()).or_insert(0) += count;
            }
            _ => warn!(key, "gender_age key lacks the gender.age shape, skipping"),
        }
    }
    (gender, age)
}

impl PlatformNormalizer for InstagramNormalizer {
    type Payload = InstagramPayload;

    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn process_insights(&self, payload: &Self::Payload) -> NormalizedInsights {
        let platform = self.platform();

        let demographics = match &payload.demographics {
            Some(demo) => {
                let (gender, age) = split_gender_age(&demo.gender_age);
                Demographics {
                    age_distribution: percentage_distribution(&age),
                    gender_distribution: percentage_distribution(&gender),
                    age_gender_distribution: percentage_distribution(&demo.gender_age),
                    geography_distribution: percentage_distribution(&demo.countries),
                    total_audience: demo.total_followers,
                    ..Default::default()
                }
            }
            None => {
                warn_missing(platform, "demographics");
                Demographics::default()
            }
        };

        let mut metrics = InstagramEngagementMetrics::default();
        match &payload.engagement_data {
            Some(eng) => {
                metrics.overall_engagement_rate =
                    engagement_rate(eng.total_interactions, eng.follower_count);
                metrics.follower_growth_rate = eng.follower_growth_rate;
            }
            None => warn_missing(platform, "engagement_data"),
        }
        match &payload.interest_data {
            Some(interests) => metrics.top_interests = top_n(&interests.interests, 10),
            None => warn_missing(platform, "interest_data"),
        }

        let data_quality = section_quality(&[
            ("demographics", payload.demographics.is_some()),
            ("activity_data", payload.activity_data.is_some()),
            ("engagement_data", payload.engagement_data.is_some()),
            ("interest_data", payload.interest_data.is_some()),
            ("content_data", payload.content_data.is_some()),
            ("growth_data", payload.growth_data.is_some()),
        ]);

        NormalizedInsights {
            platform,
            activity: normalize_activity(platform, payload.activity_data.as_ref()),
            engagement: PlatformEngagement::Instagram(metrics),
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
