//! Percentage distributions and deterministic top-N rankings.
//!
//! Every normalized sub-distribution in the engine goes through
//! [`percentage_distribution`], so the zero-sum guard lives in exactly one
//! place. Rankings go through [`top_n`] so tie-breaking is reproducible.

use std::collections::BTreeMap;

/// Converts a category → count mapping into category → percentage.
///
/// Each count is divided by the sum of all counts and scaled to `[0, 100]`.
/// When the sum is zero (including the empty mapping) every category maps
/// to exactly `0.0`, never a division error.
#[must_use]
pub fn percentage_distribution(counts: &BTreeMap<String, u64>) -> BTreeMap<String, f64> {
    let total: u64 = counts.values().sum();
    counts
        .iter()
        .map(|(label, &count)| {
            let pct = if total == 0 {
                0.0
            } else {
                #[allow(clippy::cast_precision_loss)]
                let pct = (count as f64 / total as f64) * 100.0;
                pct
            };
            (label.clone(), pct)
        })
        .collect()
}

/// Ranks labels by value, descending, truncated to `n` items.
///
/// Ties are broken by ascending label so that identical inputs always
/// produce identical rankings. `BTreeMap` iterates in ascending label
/// order, so a stable sort on the value alone preserves that tie-break.
#[must_use]
pub fn top_n<V: PartialOrd + Copy>(counts: &BTreeMap<String, V>, n: usize) -> Vec<(String, V)> {
    let mut ranked: Vec<(String, V)> = counts
        .iter()
        .map(|(label, &value)| (label.clone(), value))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}
