//! Profile ID validation

use std::collections::HashSet;

use anyhow::{bail, Result};
use parity_core::RecordSource;

/// Most profiles a single request may name.
pub(crate) const MAX_PROFILES: usize = 10;

/// Salesforce IDs are 15 (case-sensitive) or 18 (case-insensitive)
/// characters. Anything in between is accepted too.
fn is_profile_id(id: &str) -> bool {
    (15..=18).contains(&id.len()) && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Check the requested IDs and drop duplicates, keeping the first
/// occurrence.
pub(crate) fn validate_profile_ids(ids: &[String], min: usize) -> Result<Vec<String>> {
    let invalid: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| !is_profile_id(id))
        .collect();
    if !invalid.is_empty() {
        bail!(
            "invalid profile ID(s): {}. IDs are 15 to 18 letters and digits",
            invalid.join(", ")
        );
    }

    let mut seen = HashSet::new();
    let unique: Vec<String> = ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();

    if unique.len() < min {
        bail!(
            "at least {} distinct profile ID(s) are needed; got {}",
            min,
            unique.len()
        );
    }
    if unique.len() > MAX_PROFILES {
        bail!(
            "at most {} profiles can be requested at once; got {}",
            MAX_PROFILES,
            unique.len()
        );
    }
    Ok(unique)
}

/// Rewrite IDs into the form the source reports, dropping any that turn
/// out to name the same profile.
pub(crate) fn canonical_ids<S: RecordSource>(source: &S, ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| source.canonical_id(id))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
