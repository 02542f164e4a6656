//! Compare command execution

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use parity_core::{
    compare, logging::warn, CompareOptions, ComparisonResult, NormalizedProfile, Normalizer,
};

use crate::{
    cmd::{OutputFormat, ProjectArgs},
    ids::{canonical_ids, validate_profile_ids},
    source,
};

pub(super) async fn compare_live(
    profile_ids: &[String],
    options: CompareOptions,
    format: OutputFormat,
    project: &ProjectArgs,
) -> Result<()> {
    let requested = validate_profile_ids(profile_ids, 2)?;
    let config = source::load_config(project)?;
    let connector = source::connector(project, &config)?;

    let requested = canonical_ids(&connector, &requested);

    let profiles = Normalizer::new(&connector, config.normalize_options())
        .normalize_profiles(&requested)
        .await?;
    ensure_comparable(&requested, &profiles)?;

    print_result(&compare(&profiles, options)?, format)
}

/// Warn about requested profiles that produced no document, and fail if
/// fewer than two are left.
fn ensure_comparable(requested: &[String], profiles: &[NormalizedProfile]) -> Result<()> {
    let unresolved = unresolved_ids(requested, profiles);
    if !unresolved.is_empty() {
        warn!(
            "no permission data found for profile(s): {}",
            unresolved.join(", ")
        );
    }
    if profiles.len() < 2 {
        bail!(
            "only {} of the requested profiles could be resolved; at least 2 are needed to compare",
            profiles.len()
        );
    }
    Ok(())
}

pub(super) fn compare_saved(
    files: &[PathBuf],
    options: CompareOptions,
    format: OutputFormat,
) -> Result<()> {
    let profiles = read_profiles(files)?;
    print_result(&compare(&profiles, options)?, format)
}

/// Read saved profiles. A file may hold one document or an array of them.
pub(crate) fn read_profiles(files: &[PathBuf]) -> Result<Vec<NormalizedProfile>> {
    let mut profiles = vec![];
    for file in files {
        let raw = std::fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", file.display()))?;
        if value.is_array() {
            let mut many: Vec<NormalizedProfile> = serde_json::from_value(value)
                .with_context(|| format!("reading profiles from {}", file.display()))?;
            profiles.append(&mut many);
        } else {
            profiles.push(
                serde_json::from_value(value)
                    .with_context(|| format!("reading profile from {}", file.display()))?,
            );
        }
    }
    Ok(profiles)
}

fn unresolved_ids(requested: &[String], profiles: &[NormalizedProfile]) -> Vec<String> {
    requested
        .iter()
        .filter(|id| !profiles.iter().any(|p| &p.profile_id == *id))
        .cloned()
        .collect()
}

fn print_result(result: &ComparisonResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{result}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(result).context("serializing comparison")?
        ),
    }
    Ok(())
}
