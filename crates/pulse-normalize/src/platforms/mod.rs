//! The five platform normalizers and the helpers they share.
//!
//! Each normalizer is a unit struct implementing [`PlatformNormalizer`]
//! for its platform's typed payload. Normalization never fails: a missing
//! section is logged, produces an empty sub-result, and lowers the
//! payload's data-quality score.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_core::{percentage_distribution, top_n, DataQuality, Platform};
use regex::Regex;
use tracing::warn;

use crate::insights::{Activity, ContentItem, ContentPerformance, NormalizedInsights};
use crate::payload::{ActivitySection, ContentSection, RawContentItem};

mod instagram;
mod reddit;
mod tiktok;
mod twitter;
mod youtube;

pub use instagram::InstagramNormalizer;
pub use reddit::RedditNormalizer;
pub use tiktok::TikTokNormalizer;
pub use twitter::TwitterNormalizer;
pub use youtube::YouTubeNormalizer;

/// Turns one platform's typed raw payload into the shared insights shape.
pub trait PlatformNormalizer {
    type Payload;

    fn platform(&self) -> Platform;

    /// Normalize a raw payload. Infallible: missing or partial sections
    /// degrade to empty sub-results and a lower data-quality score.
    fn process_insights(&self, payload: &Self::Payload) -> NormalizedInsights;
}

/// Logs a missing payload section. The caller records the gap through the
/// data-quality assessment.
pub(crate) fn warn_missing(platform: Platform, section: &str) {
    warn!(platform = %platform, section, "payload section missing, producing empty sub-result");
}

/// Overall engagement rate as a percentage of the audience. Zero audience
/// yields 0.0 rather than dividing.
pub(crate) fn engagement_rate(interactions: u64, audience: u64) -> f64 {
    if audience == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = interactions as f64 / audience as f64 * 100.0;
    rate
}

/// Parses a collector's ISO-8601 `collected_at` stamp. Unparseable stamps
/// are logged and dropped.
pub(crate) fn parse_collected_at(platform: Platform, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!(platform = %platform, raw, error = %e, "unparseable collected_at stamp");
            None
        }
    }
}

/// Hourly/weekly activity counts into percentage distributions plus the
/// top three peak times.
pub(crate) fn normalize_activity(platform: Platform, section: Option<&ActivitySection>) -> Activity {
    let Some(section) = section else {
        warn_missing(platform, "activity_data");
        return Activity::default();
    };
    let hourly = percentage_distribution(&section.hourly_activity);
    let weekly = percentage_distribution(&section.weekly_activity);
    let peak_times = top_n(&hourly, 3);
    Activity {
        hourly_distribution: hourly,
        weekly_distribution: weekly,
        peak_times,
    }
}

impl From<&RawContentItem> for ContentItem {
    fn from(raw: &RawContentItem) -> Self {
        ContentItem {
            title: raw.title.clone(),
            content_type: raw.content_type.clone(),
            length_secs: raw.length_secs,
            publish_hour: raw.publish_hour,
            topics: raw.topics.clone(),
            engagement: raw.engagement,
            url: raw.url.clone(),
        }
    }
}

/// Content section into top/low item lists plus a ranking of the most
/// frequent topic labels across all listed items.
pub(crate) fn content_performance(
    platform: Platform,
    section: Option<&ContentSection>,
) -> ContentPerformance {
    let Some(section) = section else {
        warn_missing(platform, "content_data");
        return ContentPerformance::default();
    };
    let mut topic_counts: BTreeMap<String, u64> = BTreeMap::new();
    for item in section.top_items.iter().chain(&section.low_items) {
        for topic in &item.topics {
            *topic_counts.entry(topic.to_lowercase()).or_insert(0) += 1;
        }
    }
    ContentPerformance {
        top_items: section.top_items.iter().map(ContentItem::from).collect(),
        low_items: section.low_items.iter().map(ContentItem::from).collect(),
        top_topics: top_n(&topic_counts, 10),
    }
}

/// Extracts lowercase topic tokens of more than four letters from free
/// text, for platforms that only report titles.
pub(crate) fn topic_tokens(text: &str) -> Vec<String> {
    let re = Regex::new(r"[A-Za-z]{5,}").expect("valid topic token regex");
    re.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Section-level data quality: which of the expected payload sections
/// actually arrived.
pub(crate) fn section_quality(present: &[(&str, bool)]) -> DataQuality {
    let expected: Vec<&str> = present.iter().map(|(name, _)| *name).collect();
    let available: Vec<&str> = present
        .iter()
        .filter(|(_, here)| *here)
        .map(|(name, _)| *name)
        .collect();
    DataQuality::assess(&available, &expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_rate_guards_zero_audience() {
        assert!((engagement_rate(500, 0)).abs() < f64::EPSILON);
        assert!((engagement_rate(50, 1000) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn activity_peaks_are_the_top_three_hours() {
        let section = ActivitySection {
            hourly_activity: [
                ("09".to_string(), 10),
                ("12".to_string(), 40),
                ("18".to_string(), 30),
                ("21".to_string(), 20),
            ]
            .into(),
            weekly_activity: BTreeMap::new(),
        };
        let activity = normalize_activity(Platform::Twitter, Some(&section));
        let labels: Vec<&str> = activity.peak_times.iter().map(|(h, _)| h.as_str()).collect();
        assert_eq!(labels, ["12", "18", "21"]);
        assert!((activity.hourly_distribution["12"] - 40.0).abs() < 1e-9);
    }

    #[test]
    fn missing_activity_section_is_empty_not_fatal() {
        let activity = normalize_activity(Platform::Reddit, None);
        assert!(activity.hourly_distribution.is_empty());
        assert!(activity.peak_times.is_empty());
    }

    #[test]
    fn topic_tokens_keep_words_longer_than_four_letters() {
        let tokens = topic_tokens("Best rust tips for async programming in 2024");
        assert_eq!(tokens, ["async", "programming"]);
    }

    #[test]
    fn section_quality_counts_present_sections() {
        let quality = section_quality(&[
            ("engagement_data", true),
            ("content_data", false),
        ]);
        assert!((quality.completeness_score - 0.5).abs() < 1e-9);
        assert_eq!(quality.missing_metrics, ["content_data"]);
    }
}
