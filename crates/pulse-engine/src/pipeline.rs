//! Per-platform analysis and the multi-platform batch runner.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pulse_compliance::ComplianceGate;
use pulse_core::{EngagementRecord, Platform};
use pulse_engagement::{engagement_summary, EngagementSummary, LexiconModel};
use pulse_normalize::{NormalizedInsights, RawInsightsPayload};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::health::HealthThresholds;
use crate::summary::{build_insights_summary, InsightsSummary};

/// One platform's worth of analysis input: the collector payload, the raw
/// engagement records behind it, and the fields the collector requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub payload: RawInsightsPayload,
    #[serde(default)]
    pub records: Vec<EngagementRecord>,
    #[serde(default)]
    pub requested_fields: Vec<String>,
}

/// Compliance state observed while producing a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    /// Whether the requested field selection passed policy.
    pub collection_allowed: bool,
    /// Whether this analysis stayed within the platform's rate window.
    pub within_rate_limit: bool,
    /// Records dropped by the retention filter.
    pub records_dropped: usize,
}

/// Everything the engine produces for one platform in one cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformReport {
    pub platform: Platform,
    pub compliance: ComplianceSnapshot,
    pub insights: NormalizedInsights,
    pub engagement: EngagementSummary,
    pub summary: InsightsSummary,
}

/// Runs the full pipeline for one platform: compliance checks, retention
/// filtering, normalization, engagement scoring, and the distilled
/// summary. Pure and synchronous; the batch runner wraps it in tasks.
#[must_use]
pub fn analyze_platform(
    gate: &ComplianceGate,
    request: &AnalysisRequest,
    thresholds: &HealthThresholds,
    now: DateTime<Utc>,
) -> PlatformReport {
    let platform = request.payload.platform();
    let name = platform.as_str();
    debug!(platform = %platform, records = request.records.len(), "analyzing platform");

    let collection_allowed = gate.validate_data_collection(name, &request.requested_fields);
    let within_rate_limit = gate.record_request_at(name, now);

    let before = request.records.len();
    let retained = gate.filter_retained(name, request.records.clone(), now);
    let records_dropped = before - retained.len();

    let insights = request.payload.normalize();
    let engagement = engagement_summary(&retained, &LexiconModel);
    let summary = build_insights_summary(&insights, thresholds);

    PlatformReport {
        platform,
        compliance: ComplianceSnapshot {
            collection_allowed,
            within_rate_limit,
            records_dropped,
        },
        insights,
        engagement,
        summary,
    }
}

/// One batch entry: the payload still in wire form, so a malformed entry
/// fails alone instead of poisoning the whole batch.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub payload: serde_json::Value,
    pub records: Vec<EngagementRecord>,
    pub requested_fields: Vec<String>,
}

fn analyze_item(
    gate: &ComplianceGate,
    item: BatchItem,
    thresholds: &HealthThresholds,
    now: DateTime<Utc>,
) -> Result<PlatformReport, EngineError> {
    let payload = RawInsightsPayload::from_json(item.payload)?;
    let request = AnalysisRequest {
        payload,
        records: item.records,
        requested_fields: item.requested_fields,
    };
    Ok(analyze_platform(gate, &request, thresholds, now))
}

/// Analyzes a batch of platform payloads concurrently, one blocking task
/// per platform. Results come back in input order; a platform that fails
/// to parse yields its own `Err` without aborting the others.
pub async fn analyze_batch(
    gate: Arc<ComplianceGate>,
    items: Vec<BatchItem>,
    thresholds: HealthThresholds,
    now: DateTime<Utc>,
) -> Vec<Result<PlatformReport, EngineError>> {
    let tasks = items.into_iter().map(|item| {
        let gate = Arc::clone(&gate);
        tokio::task::spawn_blocking(move || analyze_item(&gate, item, &thresholds, now))
    });

    let joined = futures::future::join_all(tasks).await;
    joined
        .into_iter()
        .map(|outcome| match outcome {
            Ok(result) => result,
            Err(join_error) => Err(EngineError::Join(join_error)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::InteractionKind;
    use serde_json::json;

    #[test]
    fn report_carries_compliance_and_summary() {
        let gate = ComplianceGate::default();
        let payload = RawInsightsPayload::from_json(json!({
            "platform": "reddit",
            "community_data": { "subscribers": 1000, "active_users": 100 },
            "engagement_data": { "engagement_rate": 0.15 }
        }))
        .unwrap();

        let mut record = EngagementRecord::new("post-1", InteractionKind::Comment);
        record.text = Some("great discussion".to_string());
        record.timestamp = Some(Utc::now());

        let request = AnalysisRequest {
            payload,
            records: vec![record],
            requested_fields: vec!["title".to_string(), "score".to_string()],
        };
        let report =
            analyze_platform(&gate, &request, &HealthThresholds::default(), Utc::now());

        assert_eq!(report.platform, Platform::Reddit);
        assert!(report.compliance.collection_allowed);
        assert!(report.compliance.within_rate_limit);
        assert_eq!(report.compliance.records_dropped, 0);
        assert!(report.engagement.sentiment_analysis.is_some());
        assert!((report.summary.overall_engagement_rate - 0.15).abs() < 1e-9);
    }

    #[test]
    fn disallowed_fields_are_reported_not_fatal() {
        let gate = ComplianceGate::default();
        let payload =
            RawInsightsPayload::from_json(json!({ "platform": "twitter" })).unwrap();
        let request = AnalysisRequest {
            payload,
            records: Vec::new(),
            requested_fields: vec!["private_dms".to_string()],
        };
        let report =
            analyze_platform(&gate, &request, &HealthThresholds::default(), Utc::now());
        assert!(!report.compliance.collection_allowed);
        assert!(report.engagement.sentiment_analysis.is_none());
    }
}
