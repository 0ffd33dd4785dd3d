//! Five-tier engagement health classification.

use serde::{Deserialize, Serialize};

/// Health tier for an overall engagement rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementHealth {
    Excellent,
    VeryGood,
    Good,
    Average,
    NeedsImprovement,
}

impl EngagementHealth {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EngagementHealth::Excellent => "excellent",
            EngagementHealth::VeryGood => "very_good",
            EngagementHealth::Good => "good",
            EngagementHealth::Average => "average",
            EngagementHealth::NeedsImprovement => "needs_improvement",
        }
    }
}

/// Rate cutpoints for each tier, tunable per platform. A rate at or above
/// a cutpoint lands in that tier; anything below `average` needs
/// improvement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub excellent: f64,
    pub very_good: f64,
    pub good: f64,
    pub average: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        HealthThresholds {
            excellent: 15.0,
            very_good: 10.0,
            good: 5.0,
            average: 2.0,
        }
    }
}

impl HealthThresholds {
    /// Classify an engagement rate, highest tier first.
    #[must_use]
    pub fn classify(&self, rate: f64) -> EngagementHealth {
        if rate >= self.excellent {
            EngagementHealth::Excellent
        } else if rate >= self.very_good {
            EngagementHealth::VeryGood
        } else if rate >= self.good {
            EngagementHealth::Good
        } else if rate >= self.average {
            EngagementHealth::Average
        } else {
            EngagementHealth::NeedsImprovement
        }
    }
}
