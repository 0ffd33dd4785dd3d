//! PII anonymization.
//!
//! Identifying columns are replaced with a stable one-way hash so the same
//! input always maps to the same output, without being reversible.

use std::collections::{BTreeMap, BTreeSet};

use sha2::{Digest, Sha256};

/// One tabular row of collected data. `None` marks a missing value and
/// passes through anonymization unchanged.
pub type Row = BTreeMap<String, Option<String>>;

/// Length of the retained hash prefix, in hex characters.
const HASH_PREFIX_LEN: usize = 12;

/// Stable one-way hash for a sensitive identifier: SHA-256, truncated to
/// the first 12 hex characters.
#[must_use]
pub fn hash_identifier(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut hex = String::with_capacity(HASH_PREFIX_LEN);
    for byte in digest.iter().take(HASH_PREFIX_LEN / 2) {
        use std::fmt::Write;
        // Writing to a String cannot fail.
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// Replaces every value under a PII column with its hash, in place.
pub(crate) fn anonymize_rows(rows: &mut [Row], pii_fields: &BTreeSet<String>) {
    for row in rows {
        for field in pii_fields {
            if let Some(Some(value)) = row.get(field) {
                let hashed = hash_identifier(value);
                row.insert(field.clone(), Some(hashed));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Option<&str>)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.map(String::from)))
            .collect()
    }

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(hash_identifier("user_42"), hash_identifier("user_42"));
    }

    #[test]
    fn distinct_inputs_hash_differently() {
        assert_ne!(hash_identifier("user_42"), hash_identifier("user_43"));
    }

    #[test]
    fn hash_is_twelve_hex_chars() {
        let hash = hash_identifier("someone@example.com");
        assert_eq!(hash.len(), 12);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn pii_columns_are_replaced_and_others_kept() {
        let pii: BTreeSet<String> = ["username".to_string()].into_iter().collect();
        let mut rows = vec![row(&[("username", Some("alice")), ("score", Some("17"))])];
        anonymize_rows(&mut rows, &pii);
        assert_eq!(rows[0]["username"], Some(hash_identifier("alice")));
        assert_eq!(rows[0]["score"], Some("17".to_string()));
    }

    #[test]
    fn missing_values_pass_through() {
        let pii: BTreeSet<String> = ["email".to_string()].into_iter().collect();
        let mut rows = vec![row(&[("email", None)])];
        anonymize_rows(&mut rows, &pii);
        assert_eq!(rows[0]["email"], None);
    }

    #[test]
    fn absent_pii_column_is_not_inserted() {
        let pii: BTreeSet<String> = ["phone".to_string()].into_iter().collect();
        let mut rows = vec![row(&[("score", Some("3"))])];
        anonymize_rows(&mut rows, &pii);
        assert!(!rows[0].contains_key("phone"));
    }
}
