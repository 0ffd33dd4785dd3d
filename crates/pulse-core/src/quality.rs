use serde::{Deserialize, Serialize};

/// Completeness assessment of a processed analysis result.
///
/// Gaps in collector output are tolerated everywhere in the engine; this
/// is where they become observable instead of silently defaulting away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQuality {
    /// `|actual ∩ expected| / |expected|`, in `[0, 1]`.
    pub completeness_score: f64,
    /// Expected keys absent from the result, in expected-key order.
    pub missing_metrics: Vec<String>,
    /// Keys actually present.
    pub available_metrics: Vec<String>,
}

impl DataQuality {
    /// Compares the keys present in a processed result against the
    /// expected key set for that analysis category.
    #[must_use]
    pub fn assess(available: &[&str], expected: &[&str]) -> Self {
        let present = |key: &&&str| available.contains(*key);
        let hits = expected.iter().filter(present).count();

        let completeness_score = if expected.is_empty() {
            // Nothing expected means nothing can be missing.
            1.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let score = hits as f64 / expected.len() as f64;
            score
        };

        DataQuality {
            completeness_score,
            missing_metrics: expected
                .iter()
                .filter(|key| !available.contains(*key))
                .map(|key| (*key).to_string())
                .collect(),
            available_metrics: available.iter().map(|key| (*key).to_string()).collect(),
        }
    }
}
