//! Loading the project config and building the connector

use anyhow::{anyhow, Context, Result};

use parity_core::{
    config::fetch_credentials,
    logging::debug,
    project, ProjectConfig,
};
use parity_salesforce::SalesforceConnector;

use crate::cmd::ProjectArgs;

/// Read the project config. The default file is optional; an explicitly
/// named one must exist.
pub(crate) fn load_config(args: &ProjectArgs) -> Result<ProjectConfig> {
    match &args.config {
        Some(path) => ProjectConfig::read_from_file(path)
            .with_context(|| format!("reading project config {}", path.display())),
        None => {
            let path = project::parity_cfg_path_local();
            if path.exists() {
                ProjectConfig::read_from_file(&path)
                    .with_context(|| format!("reading project config {}", path.display()))
            } else {
                debug!("no {} found; using defaults", path.display());
                Ok(ProjectConfig::default())
            }
        }
    }
}

/// Build the Salesforce connector named in the args.
pub(crate) fn connector(args: &ProjectArgs, config: &ProjectConfig) -> Result<SalesforceConnector> {
    let creds_path = args
        .credentials
        .clone()
        .unwrap_or_else(project::connector_cfg_path);
    let creds = fetch_credentials(&creds_path).map_err(|_| {
        anyhow!(
            "unable to read {} - add an entry named {} with instance_url and access_token",
            creds_path.display(),
            args.connector
        )
    })?;
    let connector_creds = creds.get(&args.connector).ok_or_else(|| {
        anyhow!(
            "unable to find a connector called {} in {}",
            args.connector,
            creds_path.display()
        )
    })?;

    SalesforceConnector::new(&config.connector, connector_creds)
}
