use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One kind of audience interaction.
///
/// Interaction types outside the known set deserialize to [`Other`] and
/// carry weight zero, so unexpected collector output never aborts scoring.
///
/// [`Other`]: InteractionKind::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Comment,
    Share,
    Save,
    #[serde(other)]
    Other,
}

impl InteractionKind {
    /// Fixed engagement weight applied before summation.
    ///
    /// Reflects the assumed relative value of each interaction type.
    #[must_use]
    pub fn weight(self) -> u64 {
        match self {
            InteractionKind::Like => 1,
            InteractionKind::Comment => 3,
            InteractionKind::Save => 4,
            InteractionKind::Share => 5,
            InteractionKind::Other => 0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::Like => "like",
            InteractionKind::Comment => "comment",
            InteractionKind::Share => "share",
            InteractionKind::Save => "save",
            InteractionKind::Other => "other",
        }
    }
}

/// One unit (or pre-aggregated batch) of audience interaction.
///
/// A content item with 50 likes can arrive as 50 records with `count = 1`
/// or as a single record with `count = 50`; weighted totals are identical
/// either way. Records missing `timestamp` or `engagement_type` are still
/// accepted; scoring operations exclude them from the aggregations that
/// need those fields instead of failing the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub content_id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "engagement_type", default)]
    pub kind: Option<InteractionKind>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub audience_segment: Option<String>,
    #[serde(default = "one")]
    pub count: u64,
}

fn one() -> u64 {
    1
}

impl EngagementRecord {
    /// A minimal record: one interaction of `kind` against `content_id`.
    #[must_use]
    pub fn new(content_id: impl Into<String>, kind: InteractionKind) -> Self {
        EngagementRecord {
            content_id: content_id.into(),
            text: None,
            kind: Some(kind),
            timestamp: None,
            content_type: None,
            audience_segment: None,
            count: 1,
        }
    }

    /// Total engagement weight carried by this record.
    ///
    /// Zero when the interaction kind is missing or unknown.
    #[must_use]
    pub fn weighted(&self) -> u64 {
        self.kind.map_or(0, InteractionKind::weight) * self.count
    }
}
