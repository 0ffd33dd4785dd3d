//! Per-platform compliance policy.
//!
//! The profile table is external configuration (YAML), keyed by
//! lower-cased platform name. A compiled-in default table covers the five
//! supported platforms so the engine works without any config file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;

/// Columns treated as personally identifying across all platforms unless
/// a profile overrides them.
const DEFAULT_PII_FIELDS: &[&str] = &["username", "email", "phone", "location", "author", "user_id"];

/// Default retention window, in days.
const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Policy describing what may be collected from one platform, at what
/// cadence, and which fields are personally identifying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceProfile {
    /// Fields a collector is permitted to request.
    #[serde(default)]
    pub allowed_fields: BTreeSet<String>,
    /// Maximum requests per window. `None` means unbounded.
    #[serde(default)]
    pub rate_limit: Option<u32>,
    /// Length of the rate-limit window, in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Maximum items per collection cycle, when the platform caps it.
    #[serde(default)]
    pub max_items: Option<u32>,
    /// Columns to anonymize before the data leaves the gate.
    #[serde(default)]
    pub pii_fields: BTreeSet<String>,
    /// Records older than this are dropped from analysis.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_window_secs() -> u64 {
    60
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

impl ComplianceProfile {
    /// The profile handed out for platforms with no configuration: no
    /// allowed fields, unbounded rate limit. PII hashing and retention
    /// stay at their defaults so anonymization never silently turns off.
    #[must_use]
    pub fn permissive() -> Self {
        ComplianceProfile {
            allowed_fields: BTreeSet::new(),
            rate_limit: None,
            window_secs: default_window_secs(),
            max_items: None,
            pii_fields: default_pii(),
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    /// True iff `request_count` fits within the configured rate limit.
    #[must_use]
    pub fn allows_request_count(&self, request_count: u32) -> bool {
        self.rate_limit.is_none_or(|limit| request_count <= limit)
    }
}

fn default_pii() -> BTreeSet<String> {
    DEFAULT_PII_FIELDS.iter().map(|f| (*f).to_string()).collect()
}

fn fields(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|f| (*f).to_string()).collect()
}

/// The full per-platform profile table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Profiles keyed by lower-cased platform name.
    pub platforms: BTreeMap<String, ComplianceProfile>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        let mut platforms = BTreeMap::new();

        platforms.insert(
            "reddit".to_string(),
            ComplianceProfile {
                allowed_fields: fields(&[
                    "title",
                    "text",
                    "author",
                    "created_utc",
                    "score",
                    "num_comments",
                    "url",
                    "subreddit",
                ]),
                // 60 requests per minute.
                rate_limit: Some(60),
                window_secs: 60,
                max_items: Some(1000),
                pii_fields: default_pii(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        );

        platforms.insert(
            "twitter".to_string(),
            ComplianceProfile {
                allowed_fields: fields(&[
                    "text",
                    "user",
                    "created_at",
                    "retweet_count",
                    "favorite_count",
                    "hashtags",
                ]),
                // 450 requests per 15-minute window.
                rate_limit: Some(450),
                window_secs: 900,
                max_items: Some(3200),
                pii_fields: default_pii(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        );

        platforms.insert(
            "instagram".to_string(),
            ComplianceProfile {
                allowed_fields: fields(&[
                    "caption",
                    "user",
                    "timestamp",
                    "like_count",
                    "comment_count",
                    "media_type",
                ]),
                // 200 requests per hour.
                rate_limit: Some(200),
                window_secs: 3600,
                max_items: Some(100),
                pii_fields: default_pii(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        );

        platforms.insert(
            "tiktok".to_string(),
            ComplianceProfile {
                allowed_fields: fields(&[
                    "description",
                    "create_time",
                    "like_count",
                    "comment_count",
                    "share_count",
                    "view_count",
                ]),
                // 600 requests per day.
                rate_limit: Some(600),
                window_secs: 86_400,
                max_items: Some(500),
                pii_fields: default_pii(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        );

        platforms.insert(
            "youtube".to_string(),
            ComplianceProfile {
                allowed_fields: fields(&[
                    "title",
                    "description",
                    "published_at",
                    "view_count",
                    "like_count",
                    "comment_count",
                    "duration",
                ]),
                // 10 000 quota units per day.
                rate_limit: Some(10_000),
                window_secs: 86_400,
                max_items: Some(500),
                pii_fields: default_pii(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        );

        ComplianceConfig { platforms }
    }
}

impl ComplianceConfig {
    /// Parse a profile table from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError::ConfigParse`] if the document does not
    /// match the profile schema.
    pub fn from_yaml_str(content: &str) -> Result<Self, ComplianceError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a profile table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError::ConfigIo`] if the file cannot be read,
    /// or [`ComplianceError::ConfigParse`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ComplianceError> {
        let content = std::fs::read_to_string(path).map_err(|e| ComplianceError::ConfigIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }
}
