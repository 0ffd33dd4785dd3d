//! Engagement velocity and acceleration over hourly windows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_core::EngagementRecord;
use serde::{Deserialize, Serialize};

const SECS_PER_HOUR: i64 = 3600;

/// Discrete time-derivatives of the hourly engagement series.
///
/// Map keys are RFC 3339 bucket-start instants in UTC, so lexicographic
/// order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityMetrics {
    /// Weighted engagement per hourly bucket, contiguous from the first
    /// to the last observed hour (quiet hours count 0).
    pub hourly_engagement: BTreeMap<String, u64>,
    /// First difference of the hourly series. The first bucket has no
    /// predecessor and therefore no entry at all, never a zero that
    /// could bias the average.
    pub hourly_velocity: BTreeMap<String, f64>,
    /// First difference of the velocity series.
    pub acceleration: BTreeMap<String, f64>,
    /// Maximum of the velocity series. `None` with fewer than two buckets.
    pub peak_velocity: Option<f64>,
    /// Mean of the defined velocities. `None` with fewer than two buckets.
    pub avg_velocity: Option<f64>,
}

/// Floors an instant to the start of its hour.
fn bucket_start(ts: DateTime<Utc>) -> i64 {
    ts.timestamp().div_euclid(SECS_PER_HOUR) * SECS_PER_HOUR
}

fn bucket_key(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map_or_else(|| secs.to_string(), |dt| dt.to_rfc3339())
}

/// Buckets records into hourly windows and computes the velocity
/// (first difference) and acceleration (second difference) series.
///
/// Records without a timestamp cannot be placed in a window and are
/// excluded; they are not otherwise penalized. Returns `None` when no
/// record carries a timestamp.
pub fn engagement_velocity(records: &[EngagementRecord]) -> Option<VelocityMetrics> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    let mut skipped = 0_usize;

    for record in records {
        match record.timestamp {
            Some(ts) => {
                *buckets.entry(bucket_start(ts)).or_insert(0) += record.weighted();
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "records without timestamps excluded from velocity");
    }
    if buckets.is_empty() {
        tracing::error!("velocity tracking requested without any timestamped records");
        return None;
    }

    // Fill quiet hours between the first and last bucket with zero, the
    // way a fixed-frequency resample would.
    let first = *buckets.keys().next().expect("non-empty buckets");
    let last = *buckets.keys().next_back().expect("non-empty buckets");
    let mut series: Vec<(i64, u64)> = Vec::new();
    let mut hour = first;
    while hour <= last {
        series.push((hour, buckets.get(&hour).copied().unwrap_or(0)));
        hour += SECS_PER_HOUR;
    }

    let hourly_engagement: BTreeMap<String, u64> = series
        .iter()
        .map(|&(hour, count)| (bucket_key(hour), count))
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let velocities: Vec<(i64, f64)> = series
        .windows(2)
        .map(|pair| (pair[1].0, pair[1].1 as f64 - pair[0].1 as f64))
        .collect();

    let acceleration: BTreeMap<String, f64> = velocities
        .windows(2)
        .map(|pair| (bucket_key(pair[1].0), pair[1].1 - pair[0].1))
        .collect();

    let peak_velocity = velocities
        .iter()
        .map(|&(_, v)| v)
        .fold(None, |max: Option<f64>, v| {
            Some(max.map_or(v, |m| m.max(v)))
        });
    #[allow(clippy::cast_precision_loss)]
    let avg_velocity = if velocities.is_empty() {
        None
    } else {
        Some(velocities.iter().map(|&(_, v)| v).sum::<f64>() / velocities.len() as f64)
    };

    Some(VelocityMetrics {
        hourly_engagement,
        hourly_velocity: velocities
            .into_iter()
            .map(|(hour, v)| (bucket_key(hour), v))
            .collect(),
        acceleration,
        peak_velocity,
        avg_velocity,
    })
}
