//! Cross-platform insights summary.
//!
//! Collapses a platform's normalized insights into the handful of numbers
//! a report consumer acts on: audience size, a health tier for the
//! overall engagement rate, period-over-period growth, and content
//! recommendations derived from what performed and what did not.

use std::collections::BTreeMap;

use pulse_core::{top_n, DataQuality, Platform};
use pulse_normalize::payload::PeriodPair;
use pulse_normalize::{ContentItem, NormalizedInsights};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::health::{EngagementHealth, HealthThresholds};

/// The distilled view of one platform's insights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub platform: Platform,
    pub total_audience: u64,
    pub overall_engagement_rate: f64,
    pub engagement_health: EngagementHealth,
    pub growth: GrowthIndicators,
    /// One recommendation per content type among the top performers,
    /// strongest type first.
    pub content_recommendations: Vec<ContentRecommendation>,
    /// What to stop producing, from the low performers.
    pub avoid: Vec<String>,
    pub data_quality: DataQuality,
}

/// Period-over-period percentage deltas. A delta is absent when either
/// period is missing or the previous period is zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthIndicators {
    pub follower_growth_pct: Option<f64>,
    pub engagement_growth_pct: Option<f64>,
    pub view_growth_pct: Option<f64>,
}

/// What to publish next, distilled from the top performers of one
/// content type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentRecommendation {
    pub content_type: Option<String>,
    /// Mean length of the top performers that report one.
    pub optimal_length_secs: Option<u64>,
    /// Most frequent publish hour among the top performers.
    pub best_publish_hour: Option<u32>,
    /// Up to five of the strongest topics.
    pub recommended_topics: Vec<String>,
}

fn pct_change(pair: PeriodPair) -> Option<f64> {
    if pair.previous == 0.0 {
        return None;
    }
    Some((pair.current - pair.previous) / pair.previous * 100.0)
}

fn growth_indicators(insights: &NormalizedInsights) -> GrowthIndicators {
    let Some(growth) = &insights.growth else {
        return GrowthIndicators::default();
    };
    GrowthIndicators {
        follower_growth_pct: growth.followers.and_then(pct_change),
        engagement_growth_pct: growth.engagement.and_then(pct_change),
        view_growth_pct: growth.views.and_then(pct_change),
    }
}

fn most_frequent_hour(items: &[&ContentItem]) -> Option<u32> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut hours: BTreeMap<String, u32> = BTreeMap::new();
    for hour in items.iter().filter_map(|i| i.publish_hour) {
        let key = format!("{hour:02}");
        *counts.entry(key.clone()).or_insert(0) += 1;
        hours.entry(key).or_insert(hour);
    }
    top_n(&counts, 1)
        .into_iter()
        .next()
        .and_then(|(key, _)| hours.remove(&key))
}

fn mean_length(items: &[&ContentItem]) -> Option<u64> {
    let lengths: Vec<u64> = items.iter().filter_map(|i| i.length_secs).collect();
    if lengths.is_empty() {
        return None;
    }
    Some(lengths.iter().sum::<u64>() / lengths.len() as u64)
}

/// One recommendation per content type among the top performers, the
/// most frequent type first. Untyped items contribute a single untyped
/// recommendation at the end.
fn recommendations_from(
    items: &[ContentItem],
    top_topics: &[(String, u64)],
) -> Vec<ContentRecommendation> {
    let topics: Vec<String> = top_topics.iter().take(5).map(|(t, _)| t.clone()).collect();

    let mut groups: BTreeMap<String, Vec<&ContentItem>> = BTreeMap::new();
    let mut untyped: Vec<&ContentItem> = Vec::new();
    for item in items {
        match &item.content_type {
            Some(kind) => groups.entry(kind.clone()).or_default().push(item),
            None => untyped.push(item),
        }
    }

    let sizes: BTreeMap<String, u64> = groups
        .iter()
        .map(|(kind, members)| (kind.clone(), members.len() as u64))
        .collect();

    let mut recommendations: Vec<ContentRecommendation> = top_n(&sizes, usize::MAX)
        .into_iter()
        .map(|(kind, _)| {
            let members = &groups[&kind];
            ContentRecommendation {
                content_type: Some(kind),
                optimal_length_secs: mean_length(members),
                best_publish_hour: most_frequent_hour(members),
                recommended_topics: topics.clone(),
            }
        })
        .collect();

    if !untyped.is_empty() {
        recommendations.push(ContentRecommendation {
            content_type: None,
            optimal_length_secs: mean_length(&untyped),
            best_publish_hour: most_frequent_hour(&untyped),
            recommended_topics: topics,
        });
    }
    recommendations
}

fn avoid_list(low_items: &[ContentItem]) -> Vec<String> {
    low_items
        .iter()
        .map(|item| match &item.content_type {
            Some(kind) => format!("low-performing {kind}: \"{}\"", item.title),
            None => format!("low-performing content: \"{}\"", item.title),
        })
        .collect()
}

/// Builds the distilled summary for one platform's normalized insights.
#[must_use]
pub fn build_insights_summary(
    insights: &NormalizedInsights,
    thresholds: &HealthThresholds,
) -> InsightsSummary {
    let rate = insights.engagement.overall_rate();
    let health = thresholds.classify(rate);
    debug!(
        platform = %insights.platform,
        rate,
        health = health.as_str(),
        "building insights summary"
    );

    InsightsSummary {
        platform: insights.platform,
        total_audience: insights.summary.total_audience,
        overall_engagement_rate: rate,
        engagement_health: health,
        growth: growth_indicators(insights),
        content_recommendations: recommendations_from(
            &insights.content.top_items,
            &insights.content.top_topics,
        ),
        avoid: avoid_list(&insights.content.low_items),
        data_quality: insights.summary.data_quality.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(content_type: &str, length: u64, hour: u32) -> ContentItem {
        ContentItem {
            title: format!("{content_type} at {hour}"),
            content_type: Some(content_type.to_string()),
            length_secs: Some(length),
            publish_hour: Some(hour),
            topics: Vec::new(),
            engagement: 100.0,
            url: None,
        }
    }

    #[test]
    fn recommendations_lead_with_the_dominant_type() {
        let items = vec![item("video", 60, 18), item("video", 120, 18), item("image", 0, 9)];
        let topics = vec![("launch".to_string(), 5), ("tutorial".to_string(), 3)];
        let recs = recommendations_from(&items, &topics);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].content_type.as_deref(), Some("video"));
        assert_eq!(recs[0].optimal_length_secs, Some(90));
        assert_eq!(recs[0].best_publish_hour, Some(18));
        assert_eq!(recs[0].recommended_topics, ["launch", "tutorial"]);
        assert_eq!(recs[1].content_type.as_deref(), Some("image"));
        assert_eq!(recs[1].best_publish_hour, Some(9));
    }

    #[test]
    fn no_items_yields_no_recommendations() {
        assert!(recommendations_from(&[], &[]).is_empty());
    }

    #[test]
    fn untyped_items_get_one_trailing_recommendation() {
        let untyped = ContentItem {
            title: "untitled".to_string(),
            content_type: None,
            length_secs: Some(30),
            publish_hour: None,
            topics: Vec::new(),
            engagement: 1.0,
            url: None,
        };
        let recs = recommendations_from(&[untyped], &[]);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].content_type.is_none());
        assert_eq!(recs[0].optimal_length_secs, Some(30));
        assert!(recs[0].best_publish_hour.is_none());
    }

    #[test]
    fn growth_pct_guards_zero_previous() {
        assert!(pct_change(PeriodPair { current: 10.0, previous: 0.0 }).is_none());
        let delta = pct_change(PeriodPair { current: 110.0, previous: 100.0 }).unwrap();
        assert!((delta - 10.0).abs() < 1e-9);
        let drop = pct_change(PeriodPair { current: 80.0, previous: 100.0 }).unwrap();
        assert!((drop + 20.0).abs() < 1e-9);
    }

    #[test]
    fn avoid_list_names_the_low_performers() {
        let avoid = avoid_list(&[item("meme", 0, 3)]);
        assert_eq!(avoid, ["low-performing meme: \"meme at 3\""]);
    }
}
