use pulse_core::{percentage_distribution, Platform};

use crate::insights::{
    ContentTypeEngagement, Demographics, EngagementWindows, NormalizedInsights, PlatformEngagement,
    PlatformSummary, TikTokEngagementMetrics, ViralLevel, ViralPotential,
};
use crate::payload::{ActivitySection, TikTokEngagementData, TikTokPayload};

use super::{
    content_performance, engagement_rate, normalize_activity, parse_collected_at, section_quality,
    warn_missing, PlatformNormalizer,
};

/// TikTok: device demographics, engagement windows around the peak hour,
/// per-content-type completion and loop rates, and a viral potential
/// score.
pub struct TikTokNormalizer;

/// Hours grouped by activity relative to the busiest hour: prime at
/// 80% or more of the peak, secondary at 50%, everything else low.
fn engagement_windows(activity: Option<&ActivitySection>) -> EngagementWindows {
    let mut windows = EngagementWindows::default();
    let Some(activity) = activity else {
        return windows;
    };
    let Some(peak) = activity.hourly_activity.values().copied().max() else {
        return windows;
    };
    if peak == 0 {
        return windows;
    }
    #[allow(clippy::cast_precision_loss)]
    let peak = peak as f64;
    for (hour, count) in &activity.hourly_activity {
        #[allow(clippy::cast_precision_loss)]
        let share = *count as f64 / peak;
        if share >= 0.8 {
            windows.prime_time.push(hour.clone());
        } else if share >= 0.5 {
            windows.secondary_time.push(hour.clone());
        } else {
            windows.low_activity.push(hour.clone());
        }
    }
    windows
}

/// Weighted blend of share, save, completion, and velocity, capped at
/// 100. Trending at 70 or more.
fn viral_potential(eng: &TikTokEngagementData) -> ViralPotential {
    let score = (eng.share_rate * 0.4
        + eng.save_rate * 0.2
        + eng.completion_rate * 0.2
        + eng.engagement_velocity * 0.2)
        .min(100.0);
    let level = if score >= 70.0 {
        ViralLevel::High
    } else if score >= 40.0 {
        ViralLevel::Medium
    } else {
        ViralLevel::Low
    };
    ViralPotential {
        score,
        is_trending: level == ViralLevel::High,
        level,
    }
}

impl PlatformNormalizer for TikTokNormalizer {
    type Payload = TikTokPayload;

    fn platform(&self) -> Platform {
        Platform::TikTok
    }

    fn process_insights(&self, payload: &Self::Payload) -> NormalizedInsights {
        let platform = self.platform();

        let demographics = match &payload.user_data {
            Some(users) => Demographics {
                age_distribution: percentage_distribution(&users.age_groups),
                gender_distribution: percentage_distribution(&users.gender),
                geography_distribution: percentage_distribution(&users.countries),
                device_distribution: percentage_distribution(&users.devices),
                total_audience: users.follower_count,
                ..Default::default()
            },
            None => {
                warn_missing(platform, "user_data");
                Demographics::default()
            }
        };

        let mut metrics = TikTokEngagementMetrics::default();
        match &payload.engagement_data {
            Some(eng) => {
                metrics.overall_engagement_rate =
                    engagement_rate(eng.total_interactions, eng.follower_count);
                metrics.by_content_type = eng
                    .content_type_engagement
                    .iter()
                    .map(|(kind, stats)| {
                        (
                            kind.clone(),
                            ContentTypeEngagement {
                                engagement_rate: stats.engagement_rate,
                                completion_rate: stats.completion_rate,
                                loop_rate: stats.loop_rate,
                                share_rate: stats.share_rate,
                            },
                        )
                    })
                    .collect();
                metrics.viral_potential = viral_potential(eng);
            }
            None => warn_missing(platform, "engagement_data"),
        }
        metrics.engagement_windows = engagement_windows(payload.activity_data.as_ref());

        let data_quality = section_quality(&[
            ("user_data", payload.user_data.is_some()),
            ("activity_data", payload.activity_data.is_some()),
            ("engagement_data", payload.engagement_data.is_some()),
            ("content_data", payload.content_data.is_some()),
            ("growth_data", payload.growth_data.is_some()),
        ]);

        NormalizedInsights {
            platform,
            activity: normalize_activity(platform, payload.activity_data.as_ref()),
            engagement: PlatformEngagement::TikTok(metrics),
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
