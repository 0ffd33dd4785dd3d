//! Cross-crate pipeline tests driving raw wire payloads end to end.

use std::sync::Arc;

use chrono::Utc;
use pulse_compliance::ComplianceGate;
use pulse_core::{EngagementRecord, InteractionKind, Platform};
use pulse_engine::{analyze_batch, analyze_platform, AnalysisRequest, BatchItem, HealthThresholds};
use pulse_normalize::{CommunityHealthStatus, PlatformEngagement, RawInsightsPayload};
use serde_json::json;

#[test]
fn reddit_payload_end_to_end() {
    let gate = ComplianceGate::default();
    let payload = RawInsightsPayload::from_json(json!({
        "platform": "reddit",
        "community_data": { "subscribers": 1000, "active_users": 100 },
        "engagement_data": { "engagement_rate": 0.15 },
        "content_data": {
            "posts": [
                { "title": "Launch announcement thread", "score": 400, "num_comments": 30 },
                { "title": "Weekly questions thread", "score": 50, "num_comments": 200, "is_self": true }
            ]
        }
    }))
    .expect("payload parses");

    let request = AnalysisRequest {
        payload,
        records: Vec::new(),
        requested_fields: vec!["title".to_string()],
    };
    let report = analyze_platform(&gate, &request, &HealthThresholds::default(), Utc::now());

    assert_eq!(report.platform, Platform::Reddit);
    let metrics = match &report.insights.engagement {
        PlatformEngagement::Reddit(m) => m,
        other => panic!("expected reddit metrics, got {other:?}"),
    };
    assert_eq!(metrics.community.growth_rate.subscribers, 1000);
    assert_eq!(metrics.community.growth_rate.active_users, 100);
    assert_eq!(
        metrics.community.community_health.status,
        CommunityHealthStatus::Healthy
    );
    assert!(metrics.community.recommendations.is_empty());
    assert_eq!(report.insights.content.top_items[0].title, "Launch announcement thread");
}

#[test]
fn report_serializes_to_json() {
    let gate = ComplianceGate::default();
    let payload = RawInsightsPayload::from_json(json!({
        "platform": "instagram",
        "demographics": {
            "gender_age": { "F.18-24": 100, "M.18-24": 100 },
            "total_followers": 200
        },
        "engagement_data": { "total_interactions": 10, "follower_count": 200 }
    }))
    .expect("payload parses");

    let mut record = EngagementRecord::new("reel-1", InteractionKind::Like);
    record.count = 5;

    let request = AnalysisRequest {
        payload,
        records: vec![record],
        requested_fields: vec!["caption".to_string()],
    };
    let report = analyze_platform(&gate, &request, &HealthThresholds::default(), Utc::now());

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["platform"], "instagram");
    assert_eq!(value["insights"]["engagement"]["platform"], "instagram");
    // 10 interactions over 200 followers is a 5% rate.
    assert_eq!(value["summary"]["engagement_health"], "good");
}

#[tokio::test]
async fn one_bad_payload_does_not_abort_the_batch() {
    let gate = Arc::new(ComplianceGate::default());
    let items = vec![
        BatchItem {
            payload: json!({
                "platform": "reddit",
                "community_data": { "subscribers": 500, "active_users": 40 },
                "engagement_data": { "engagement_rate": 0.08 }
            }),
            records: Vec::new(),
            requested_fields: vec!["title".to_string()],
        },
        BatchItem {
            payload: json!({ "platform": "friendster" }),
            records: Vec::new(),
            requested_fields: Vec::new(),
        },
        BatchItem {
            payload: json!({
                "platform": "youtube",
                "engagement_data": { "views": 1000, "likes": 100, "comments": 20, "shares": 5 }
            }),
            records: Vec::new(),
            requested_fields: vec!["title".to_string()],
        },
    ];

    let results = analyze_batch(gate, items, HealthThresholds::default(), Utc::now()).await;
    assert_eq!(results.len(), 3);

    let reddit = results[0].as_ref().expect("reddit analyzes");
    assert_eq!(reddit.platform, Platform::Reddit);
    match &reddit.insights.engagement {
        PlatformEngagement::Reddit(m) => {
            assert_eq!(
                m.community.community_health.status,
                CommunityHealthStatus::AtRisk
            );
            assert!(!m.community.recommendations.is_empty());
        }
        other => panic!("expected reddit metrics, got {other:?}"),
    }

    assert!(results[1].is_err());

    let youtube = results[2].as_ref().expect("youtube analyzes");
    assert_eq!(youtube.platform, Platform::YouTube);
    assert!((youtube.insights.engagement.overall_rate() - 12.5).abs() < 1e-9);
}

#[tokio::test]
async fn batch_results_keep_input_order() {
    let gate = Arc::new(ComplianceGate::default());
    let items = vec![
        BatchItem {
            payload: json!({ "platform": "tiktok" }),
            records: Vec::new(),
            requested_fields: Vec::new(),
        },
        BatchItem {
            payload: json!({ "platform": "twitter" }),
            records: Vec::new(),
            requested_fields: Vec::new(),
        },
    ];

    let results = analyze_batch(gate, items, HealthThresholds::default(), Utc::now()).await;
    let platforms: Vec<Platform> = results
        .iter()
        .map(|r| r.as_ref().expect("payload analyzes").platform)
        .collect();
    assert_eq!(platforms, [Platform::TikTok, Platform::Twitter]);
}
