//! The compliance gate itself.
//!
//! All lookups and validations are pure and never fail; missing
//! configuration degrades to a permissive profile with a logged warning.
//! The only mutable state the engine owns is the per-platform rate-limit
//! counter held here, guarded for concurrent per-platform use.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use pulse_core::EngagementRecord;

use crate::anonymize::{anonymize_rows, Row};
use crate::profile::{ComplianceConfig, ComplianceProfile};

/// Request accounting for one platform's current rate window.
#[derive(Debug, Clone, Copy)]
struct Window {
    started: DateTime<Utc>,
    count: u32,
}

/// Validates collection requests against per-platform policy and scrubs
/// collected data before it reaches the analyzers.
#[derive(Debug)]
pub struct ComplianceGate {
    config: ComplianceConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl Default for ComplianceGate {
    fn default() -> Self {
        ComplianceGate::new(ComplianceConfig::default())
    }
}

impl ComplianceGate {
    #[must_use]
    pub fn new(config: ComplianceConfig) -> Self {
        ComplianceGate {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Case-insensitive profile lookup.
    ///
    /// An unknown platform logs a warning and returns the permissive-empty
    /// profile (no allowed fields, unbounded rate limit). This fails open;
    /// a fail-closed variant is defensible but would change observable
    /// behavior, so it is deliberately not implemented here.
    #[must_use]
    pub fn profile_for(&self, platform: &str) -> ComplianceProfile {
        let key = platform.to_lowercase();
        match self.config.platforms.get(&key) {
            Some(profile) => profile.clone(),
            None => {
                tracing::warn!(platform = %platform, "no compliance limits defined for platform");
                ComplianceProfile::permissive()
            }
        }
    }

    /// True iff at least one requested field is on the platform's allowed
    /// list. A single valid field makes the whole request valid; the
    /// policy is intentionally permissive, not a subset check.
    #[must_use]
    pub fn validate_data_collection(&self, platform: &str, requested_fields: &[String]) -> bool {
        let profile = self.profile_for(platform);
        tracing::debug!(
            platform = %platform,
            requested = requested_fields.len(),
            allowed = profile.allowed_fields.len(),
            "validating field selection"
        );
        requested_fields
            .iter()
            .any(|field| profile.allowed_fields.contains(field))
    }

    /// True iff `request_count` is within the platform's rate limit.
    #[must_use]
    pub fn validate_api_usage(&self, platform: &str, request_count: u32) -> bool {
        self.profile_for(platform).allows_request_count(request_count)
    }

    /// Records one collection attempt against the platform's current rate
    /// window and reports whether it is still within the limit.
    ///
    /// The counter resets when the configured window elapses. Increments
    /// are serialized, so concurrent collectors for the same platform see
    /// a consistent count.
    ///
    /// # Panics
    ///
    /// Panics only if the internal window lock is poisoned, which requires
    /// a previous panic while holding it.
    pub fn record_request_at(&self, platform: &str, now: DateTime<Utc>) -> bool {
        let profile = self.profile_for(platform);
        let window_len = Duration::seconds(i64::try_from(profile.window_secs).unwrap_or(i64::MAX));

        let mut windows = self.windows.lock().expect("rate window lock poisoned");
        let window = windows
            .entry(platform.to_lowercase())
            .or_insert(Window { started: now, count: 0 });

        if now - window.started >= window_len {
            window.started = now;
            window.count = 0;
        }
        window.count += 1;

        let within = profile.allows_request_count(window.count);
        if !within {
            tracing::warn!(
                platform = %platform,
                count = window.count,
                limit = ?profile.rate_limit,
                "rate limit exceeded for current window"
            );
        }
        within
    }

    /// [`record_request_at`](Self::record_request_at) against the current
    /// wall clock.
    pub fn record_request(&self, platform: &str) -> bool {
        self.record_request_at(platform, Utc::now())
    }

    /// Replaces every PII column in `rows` with a stable one-way hash.
    /// Missing values pass through unchanged.
    pub fn anonymize_rows(&self, platform: &str, rows: &mut [Row]) {
        let profile = self.profile_for(platform);
        anonymize_rows(rows, &profile.pii_fields);
    }

    /// Drops engagement records older than the platform's retention
    /// window. Records without a timestamp are kept; age cannot be
    /// established for them and exclusion happens downstream where the
    /// timestamp is actually required.
    #[must_use]
    pub fn filter_retained(
        &self,
        platform: &str,
        records: Vec<EngagementRecord>,
        now: DateTime<Utc>,
    ) -> Vec<EngagementRecord> {
        let profile = self.profile_for(platform);
        let cutoff = now - Duration::days(i64::from(profile.retention_days));
        let before = records.len();

        let retained: Vec<EngagementRecord> = records
            .into_iter()
            .filter(|record| record.timestamp.is_none_or(|ts| ts >= cutoff))
            .collect();

        if retained.len() < before {
            tracing::debug!(
                platform = %platform,
                dropped = before - retained.len(),
                retention_days = profile.retention_days,
                "dropped records outside retention window"
            );
        }
        retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pulse_core::InteractionKind;

    fn gate() -> ComplianceGate {
        ComplianceGate::default()
    }

    fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, min, sec).unwrap()
    }

    #[test]
    fn unknown_platform_fails_open() {
        let profile = gate().profile_for("unknown_platform");
        assert!(profile.allowed_fields.is_empty());
        assert_eq!(profile.rate_limit, None);
        assert!(profile.allows_request_count(1_000_000));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let profile = gate().profile_for("Reddit");
        assert_eq!(profile.rate_limit, Some(60));
    }

    #[test]
    fn one_allowed_field_validates_the_request() {
        let g = gate();
        let fields = vec!["score".to_string(), "private_notes".to_string()];
        assert!(g.validate_data_collection("reddit", &fields));
    }

    #[test]
    fn no_allowed_fields_fails_validation() {
        let g = gate();
        let fields = vec!["ssn".to_string(), "private_notes".to_string()];
        assert!(!g.validate_data_collection("reddit", &fields));
        assert!(!g.validate_data_collection("reddit", &[]));
    }

    #[test]
    fn unknown_platform_rejects_every_field() {
        // Empty allowed set means no request can intersect it.
        let g = gate();
        assert!(!g.validate_data_collection("unknown_platform", &["title".to_string()]));
    }

    #[test]
    fn api_usage_boundary_is_inclusive() {
        let g = gate();
        assert!(g.validate_api_usage("reddit", 60));
        assert!(!g.validate_api_usage("reddit", 61));
    }

    #[test]
    fn request_counter_trips_past_limit() {
        let yaml = r"
platforms:
  reddit:
    allowed_fields: [title]
    rate_limit: 2
    window_secs: 60
";
        let g = ComplianceGate::new(ComplianceConfig::from_yaml_str(yaml).unwrap());
        let now = at(12, 0, 0);
        assert!(g.record_request_at("reddit", now));
        assert!(g.record_request_at("reddit", now));
        assert!(!g.record_request_at("reddit", now));
    }

    #[test]
    fn request_counter_resets_after_window() {
        let yaml = r"
platforms:
  reddit:
    allowed_fields: [title]
    rate_limit: 1
    window_secs: 60
";
        let g = ComplianceGate::new(ComplianceConfig::from_yaml_str(yaml).unwrap());
        assert!(g.record_request_at("reddit", at(12, 0, 0)));
        assert!(!g.record_request_at("reddit", at(12, 0, 30)));
        // A new window opens 60s after the first request.
        assert!(g.record_request_at("reddit", at(12, 1, 0)));
    }

    #[test]
    fn retention_filter_drops_old_records_keeps_untimed() {
        let g = gate();
        let now = at(0, 0, 0);

        let mut fresh = EngagementRecord::new("fresh", InteractionKind::Like);
        fresh.timestamp = Some(now - Duration::days(5));
        let mut stale = EngagementRecord::new("stale", InteractionKind::Like);
        stale.timestamp = Some(now - Duration::days(45));
        let untimed = EngagementRecord::new("untimed", InteractionKind::Like);

        let retained = g.filter_retained("reddit", vec![fresh, stale, untimed], now);
        let ids: Vec<&str> = retained.iter().map(|r| r.content_id.as_str()).collect();
        assert_eq!(ids, vec!["fresh", "untimed"]);
    }

    #[test]
    fn anonymize_rows_uses_platform_pii_fields() {
        let g = gate();
        let mut rows = vec![[
            ("author".to_string(), Some("some_redditor".to_string())),
            ("title".to_string(), Some("a post".to_string())),
        ]
        .into_iter()
        .collect::<Row>()];

        g.anonymize_rows("reddit", &mut rows);
        let author = rows[0]["author"].as_deref().unwrap();
        assert_ne!(author, "some_redditor");
        assert_eq!(author.len(), 12);
        assert_eq!(rows[0]["title"].as_deref(), Some("a post"));
    }
}
