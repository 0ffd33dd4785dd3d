use std::collections::BTreeMap;

use chrono::DateTime;
use pulse_core::{top_n, Platform};
use tracing::warn;

use crate::insights::{
    Activity, CommunityGrowth, CommunityHealth, CommunityHealthStatus, CommunityMetrics,
    ContentItem, ContentPerformance, Demographics, NormalizedInsights, PlatformEngagement,
    PlatformSummary, PostingPatterns, RedditEngagementMetrics,
};
use crate::payload::{RedditPayload, RedditPost};

use super::{parse_collected_at, section_quality, topic_tokens, warn_missing, PlatformNormalizer};

/// Reddit: community growth and health, post performance scored as
/// upvotes plus comments, and weekly posting patterns.
pub struct RedditNormalizer;

const HEALTHY_RATE: f64 = 0.1;
const AT_RISK_RATE: f64 = 0.05;

/// Health tier from the community's engagement rate. Recommendations
/// stay empty while the community is healthy.
fn community_health(engagement_rate: f64) -> (CommunityHealth, Vec<String>) {
    let status = if engagement_rate >= HEALTHY_RATE {
        CommunityHealthStatus::Healthy
    } else if engagement_rate >= AT_RISK_RATE {
        CommunityHealthStatus::AtRisk
    } else {
        CommunityHealthStatus::Unhealthy
    };
    let recommendations = match status {
        CommunityHealthStatus::Healthy => Vec::new(),
        CommunityHealthStatus::AtRisk => vec![
            "Post during peak activity hours to lift engagement".to_string(),
            "Reply to commenters to keep discussions alive".to_string(),
        ],
        CommunityHealthStatus::Unhealthy => vec![
            "Increase posting frequency to re-activate subscribers".to_string(),
            "Run discussion threads to draw lurkers into commenting".to_string(),
            "Cross-promote standout posts in related communities".to_string(),
        ],
    };
    (CommunityHealth { status, engagement_rate }, recommendations)
}

fn post_engagement(post: &RedditPost) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let engagement = (post.score + post.num_comments) as f64;
    engagement
}

fn post_item(post: &RedditPost) -> ContentItem {
    ContentItem {
        title: post.title.clone(),
        content_type: Some(if post.is_self { "text" } else { "link" }.to_string()),
        length_secs: None,
        publish_hour: post
            .created_utc
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| {
                use chrono::Timelike;
                dt.hour()
            }),
        topics: topic_tokens(&post.title),
        engagement: post_engagement(post),
        url: post.url.clone(),
    }
}

/// Top five posts by upvotes plus comments, the bottom five as the low
/// performers, and the ten most frequent title topics.
fn post_performance(posts: &[RedditPost]) -> ContentPerformance {
    let mut ranked: Vec<&RedditPost> = posts.iter().collect();
    ranked.sort_by(|a, b| {
        post_engagement(b)
            .partial_cmp(&post_engagement(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
    });

    let top_items: Vec<ContentItem> = ranked.iter().take(5).map(|&p| post_item(p)).collect();
    let low_items: Vec<ContentItem> = if ranked.len() > 5 {
        let mut tail: Vec<ContentItem> = ranked
            .iter()
            .skip(ranked.len().saturating_sub(5).max(5))
            .map(|&p| post_item(p))
            .collect();
        tail.reverse();
        tail
    } else {
        Vec::new()
    };

    let mut topic_counts: BTreeMap<String, u64> = BTreeMap::new();
    for post in posts {
        for token in topic_tokens(&post.title) {
            *topic_counts.entry(token).or_insert(0) += 1;
        }
    }

    ContentPerformance {
        top_items,
        low_items,
        top_topics: top_n(&topic_counts, 10),
    }
}

/// Post counts by kind and by weekday. Posts without a timestamp are
/// counted by kind only.
fn posting_patterns(posts: &[RedditPost]) -> PostingPatterns {
    let mut patterns = PostingPatterns::default();
    for post in posts {
        let kind = if post.is_self { "text" } else { "link" };
        *patterns.post_types.entry(kind.to_string()).or_insert(0) += 1;
        match post.created_utc.and_then(|secs| DateTime::from_timestamp(secs, 0)) {
            Some(dt) => {
                let day = dt.format("%A").to_string();
                *patterns.weekly_activity.entry(day).or_insert(0) += 1;
            }
            None => warn!(title = %post.title, "post has no usable created_utc, skipping weekday count"),
        }
    }
    patterns
}

impl PlatformNormalizer for RedditNormalizer {
    type Payload = RedditPayload;

    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    fn process_insights(&self, payload: &Self::Payload) -> NormalizedInsights {
        let platform = self.platform();

        let growth = match &payload.community_data {
            Some(community) => CommunityGrowth {
                subscribers: community.subscribers,
                active_users: community.active_users,
            },
            None => {
                warn_missing(platform, "community_data");
                CommunityGrowth::default()
            }
        };

        let engagement_rate = match &payload.engagement_data {
            Some(eng) => eng.engagement_rate,
            None => {
                warn_missing(platform, "engagement_data");
                0.0
            }
        };
        let (health, recommendations) = community_health(engagement_rate);

        let (content, posting) = match &payload.content_data {
            Some(content) => (
                post_performance(&content.posts),
                posting_patterns(&content.posts),
            ),
            None => {
                warn_missing(platform, "content_data");
                (ContentPerformance::default(), PostingPatterns::default())
            }
        };

        let metrics = RedditEngagementMetrics {
            overall_engagement_rate: engagement_rate,
            community: CommunityMetrics {
                growth_rate: growth,
                community_health: health,
                recommendations,
            },
            posting,
        };

        let data_quality = section_quality(&[
            ("community_data", payload.community_data.is_some()),
            ("engagement_data", payload.engagement_data.is_some()),
            ("content_data", payload.content_data.is_some()),
            ("growth_data", payload.growth_data.is_some()),
        ]);

        let total_audience = metrics.community.growth_rate.subscribers;
        NormalizedInsights {
            platform,
            demographics: Demographics {
                total_audience,
                ..Default::default()
            },
            // Subreddits report no per-hour audience activity.
            activity: Activity::default(),
            engagement: PlatformEngagement::Reddit(metrics),
            content,
            growth: payload.growth_data.clone(),
            summary: PlatformSummary {
                total_audience,
                data_quality,
            },
            collected_at: parse_collected_at(platform, payload.collected_at.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{RedditCommunity, RedditContent, RedditEngagementData};

    fn reddit_metrics(insights: &NormalizedInsights) -> &RedditEngagementMetrics {
        match &insights.engagement {
            PlatformEngagement::Reddit(m) => m,
            other => panic!("expected reddit metrics, got {other:?}"),
        }
    }

    #[test]
    fn healthy_community_passes_counts_through_with_no_recommendations() {
        let payload = RedditPayload {
            community_data: Some(RedditCommunity {
                subscribers: 1000,
                active_users: 100,
            }),
            engagement_data: Some(RedditEngagementData { engagement_rate: 0.15 }),
            ..Default::default()
        };
        let insights = RedditNormalizer.process_insights(&payload);
        let metrics = reddit_metrics(&insights);
        assert_eq!(metrics.community.growth_rate.subscribers, 1000);
        assert_eq!(metrics.community.growth_rate.active_users, 100);
        assert_eq!(
            metrics.community.community_health.status,
            CommunityHealthStatus::Healthy
        );
        assert!(metrics.community.recommendations.is_empty());
    }

    #[test]
    fn health_tiers_follow_the_rate_cutpoints() {
        let (health, recs) = community_health(0.1);
        assert_eq!(health.status, CommunityHealthStatus::Healthy);
        assert!(recs.is_empty());

        let (health, recs) = community_health(0.07);
        assert_eq!(health.status, CommunityHealthStatus::AtRisk);
        assert!(!recs.is_empty());

        let (health, recs) = community_health(0.01);
        assert_eq!(health.status, CommunityHealthStatus::Unhealthy);
        assert!(!recs.is_empty());
    }

    fn post(title: &str, score: u64, comments: u64, is_self: bool) -> RedditPost {
        RedditPost {
            title: title.to_string(),
            score,
            num_comments: comments,
            created_utc: Some(1_700_000_000),
            url: None,
            is_self,
        }
    }

    #[test]
    fn posts_rank_by_score_plus_comments() {
        let posts = vec![
            post("Weekly discussion thread", 50, 200, true),
            post("Release announcement", 400, 30, false),
            post("Question about setup", 10, 5, true),
        ];
        let performance = post_performance(&posts);
        assert_eq!(performance.top_items[0].title, "Release announcement");
        assert!((performance.top_items[0].engagement - 430.0).abs() < f64::EPSILON);
        assert_eq!(performance.top_items.len(), 3);
        assert!(performance.low_items.is_empty());
    }

    #[test]
    fn title_topics_skip_short_words() {
        let posts = vec![
            post("Guide to async programming", 10, 0, true),
            post("Another async programming question", 5, 0, true),
        ];
        let performance = post_performance(&posts);
        let labels: Vec<&str> = performance.top_topics.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels[0], "async");
        assert!(!labels.contains(&"to"));
    }

    #[test]
    fn posting_patterns_split_text_and_link() {
        let posts = vec![
            post("a text post", 1, 0, true),
            post("a link post", 1, 0, false),
            post("another text post", 1, 0, true),
        ];
        let patterns = posting_patterns(&posts);
        assert_eq!(patterns.post_types["text"], 2);
        assert_eq!(patterns.post_types["link"], 1);
        assert_eq!(patterns.weekly_activity.values().sum::<u64>(), 3);
    }

    #[test]
    fn missing_sections_degrade_quality_but_never_fail() {
        let insights = RedditNormalizer.process_insights(&RedditPayload::default());
        let metrics = reddit_metrics(&insights);
        assert_eq!(
            metrics.community.community_health.status,
            CommunityHealthStatus::Unhealthy
        );
        assert!(insights.summary.data_quality.completeness_score.abs() < f64::EPSILON);
    }

    #[test]
    fn content_section_yields_low_performers_past_the_top_five() {
        let posts: Vec<RedditPost> = (0..8)
            .map(|i| post(&format!("post number {i}"), 100 - i * 10, 0, true))
            .collect();
        let performance = post_performance(&posts);
        assert_eq!(performance.top_items.len(), 5);
        assert_eq!(performance.low_items.len(), 3);
        assert_eq!(performance.low_items[0].title, "post number 7");
    }
}
