//! Sentiment-bucketed and contextually grouped engagement metrics.

use std::collections::BTreeMap;

use pulse_core::{EngagementRecord, InteractionKind};
use serde::{Deserialize, Serialize};

use crate::sentiment::{SentimentCategory, SentimentModel};
use crate::velocity::{engagement_velocity, VelocityMetrics};

/// Engagement broken down by sentiment bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentMetrics {
    /// Interaction counts per sentiment category.
    pub sentiment_distribution: BTreeMap<String, u64>,
    /// Count-weighted mean polarity across all records.
    pub avg_sentiment_score: f64,
    /// Interaction-kind counts grouped by sentiment category.
    pub engagement_by_sentiment: BTreeMap<String, BTreeMap<String, u64>>,
}

/// Weighted engagement grouped by context dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextualMetrics {
    /// Total weighted engagement per content type.
    pub by_content_type: BTreeMap<String, u64>,
    /// Total weighted engagement per audience segment.
    pub by_segment: BTreeMap<String, u64>,
    /// Total weighted engagement per hour-of-day (0–23).
    pub by_hour: BTreeMap<u32, u64>,
    /// Sum of all record weights.
    pub total_weighted: u64,
}

/// The three engagement views combined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementSummary {
    pub sentiment_analysis: Option<SentimentMetrics>,
    pub contextual_engagement: Option<ContextualMetrics>,
    pub engagement_velocity: Option<VelocityMetrics>,
}

/// Scores each record's text, buckets the polarity, and breaks interaction
/// counts down by sentiment category.
///
/// Records without text score `0.0` (neutral). Records without an
/// interaction kind still count toward the distribution and the mean but
/// are excluded from the per-kind breakdown.
///
/// Returns `None` on empty input: "no data", not a failure.
pub fn analyze_sentiment_engagement(
    records: &[EngagementRecord],
    model: &impl SentimentModel,
) -> Option<SentimentMetrics> {
    if records.is_empty() {
        tracing::error!("sentiment analysis requested over an empty record set");
        return None;
    }

    let mut distribution: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_sentiment: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    let mut score_sum = 0.0_f64;
    let mut score_weight = 0_u64;

    for record in records {
        let polarity = record
            .text
            .as_deref()
            .map_or(0.0, |text| model.polarity(text));
        let category = SentimentCategory::from_polarity(polarity);

        *distribution.entry(category.as_str().to_string()).or_insert(0) += record.count;
        #[allow(clippy::cast_precision_loss)]
        {
            score_sum += polarity * record.count as f64;
        }
        score_weight += record.count;

        if let Some(kind) = record.kind {
            *by_sentiment
                .entry(category.as_str().to_string())
                .or_default()
                .entry(kind.as_str().to_string())
                .or_insert(0) += record.count;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let avg_sentiment_score = if score_weight == 0 {
        0.0
    } else {
        score_sum / score_weight as f64
    };

    Some(SentimentMetrics {
        sentiment_distribution: distribution,
        avg_sentiment_score,
        engagement_by_sentiment: by_sentiment,
    })
}

/// Applies the fixed weight table and aggregates total weighted engagement
/// by content type, audience segment, and hour-of-day.
///
/// Unknown interaction kinds weigh zero. Records missing a grouping
/// dimension are excluded from that grouping only.
///
/// Returns `None` on empty input.
pub fn contextual_engagement(records: &[EngagementRecord]) -> Option<ContextualMetrics> {
    if records.is_empty() {
        tracing::error!("contextual engagement requested over an empty record set");
        return None;
    }

    let mut by_content_type: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_segment: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, u64> = BTreeMap::new();
    let mut total_weighted = 0_u64;

    for record in records {
        let weight = record.weighted();
        total_weighted += weight;

        if let Some(content_type) = &record.content_type {
            *by_content_type.entry(content_type.clone()).or_insert(0) += weight;
        }
        if let Some(segment) = &record.audience_segment {
            *by_segment.entry(segment.clone()).or_insert(0) += weight;
        }
        if let Some(ts) = record.timestamp {
            use chrono::Timelike;
            *by_hour.entry(ts.hour()).or_insert(0) += weight;
        }
    }

    Some(ContextualMetrics {
        by_content_type,
        by_segment,
        by_hour,
        total_weighted,
    })
}

/// Runs all three engagement views over the same records.
pub fn engagement_summary(
    records: &[EngagementRecord],
    model: &impl SentimentModel,
) -> EngagementSummary {
    EngagementSummary {
        sentiment_analysis: analyze_sentiment_engagement(records, model),
        contextual_engagement: contextual_engagement(records),
        engagement_velocity: engagement_velocity(records),
    }
}
