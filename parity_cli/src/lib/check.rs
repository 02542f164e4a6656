//! Check command execution

use anyhow::{bail, Result};
use colored::Colorize;

use parity_core::RecordSource;

use crate::{cmd::ProjectArgs, source};

pub(super) async fn check(project: &ProjectArgs) -> Result<()> {
    let config = source::load_config(project)?;
    let connector = source::connector(project, &config)?;

    if connector.check().await {
        println!("{} connected to {}", "✓".green(), project.connector);
        Ok(())
    } else {
        println!("{} unable to connect to {}", "✗".red(), project.connector);
        bail!("connection check failed")
    }
}
