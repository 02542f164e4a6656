//! Normalize command execution

use std::path::PathBuf;

use anyhow::{Context, Result};

use parity_core::{logging::info, Normalizer};

use crate::{
    cmd::ProjectArgs,
    ids::{canonical_ids, validate_profile_ids},
    source,
};

pub(super) async fn normalize(
    profile_ids: &[String],
    out: &Option<PathBuf>,
    project: &ProjectArgs,
) -> Result<()> {
    let requested = validate_profile_ids(profile_ids, 1)?;
    let config = source::load_config(project)?;
    let connector = source::connector(project, &config)?;
    let requested = canonical_ids(&connector, &requested);

    let profiles = Normalizer::new(&connector, config.normalize_options())
        .normalize_profiles(&requested)
        .await?;
    info!(
        "normalized {} of {} requested profiles",
        profiles.len(),
        requested.len()
    );

    let json = serde_json::to_string_pretty(&profiles).context("serializing profiles")?;
    match out {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!("profiles saved to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
