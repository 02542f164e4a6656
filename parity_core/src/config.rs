//! Project configuration and connector credentials.
//!
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use yaml_peg::serde as yaml;

use crate::logging::debug;
use crate::normalize::{NormalizeOptions, DEFAULT_CONCURRENT_LOOKUPS, DEFAULT_LOOKUP_BATCH_SIZE};

/// Struct representing the parity.yaml file.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProjectConfig {
    #[serde(default)]
    name: String,
    /// The declared set of system permission flags. When absent, the
    /// record source is asked to discover the set at runtime.
    #[serde(default)]
    pub system_permissions: Option<Vec<String>>,
    /// Maximum number of IDs sent in a single name lookup.
    #[serde(default = "default_lookup_batch_size")]
    pub lookup_batch_size: usize,
    /// Maximum number of name lookups in flight at once.
    #[serde(default = "default_concurrent_lookups")]
    pub concurrent_lookups: usize,
    /// Connector settings.
    #[serde(default)]
    pub connector: ConnectorConfig,
}

fn default_lookup_batch_size() -> usize {
    DEFAULT_LOOKUP_BATCH_SIZE
}

fn default_concurrent_lookups() -> usize {
    DEFAULT_CONCURRENT_LOOKUPS
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            system_permissions: None,
            lookup_batch_size: DEFAULT_LOOKUP_BATCH_SIZE,
            concurrent_lookups: DEFAULT_CONCURRENT_LOOKUPS,
            connector: ConnectorConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Read the project config from the given path.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
        let config_raw = fs::read_to_string(&path).context("Reading file")?;
        Self::from_yaml(&config_raw)
    }

    /// Parse a project config from a yaml string.
    pub fn from_yaml(raw: &str) -> Result<ProjectConfig> {
        let mut config = yaml::from_str::<ProjectConfig>(raw).context("Deserializing config")?;
        let config = config
            .pop()
            .ok_or_else(|| anyhow!["config file contained no documents"])?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.lookup_batch_size == 0 {
            return Err(anyhow!["lookup_batch_size must be greater than 0"]);
        }
        if self.concurrent_lookups == 0 {
            return Err(anyhow!["concurrent_lookups must be greater than 0"]);
        }
        Ok(())
    }

    /// Get the name
    pub fn get_name(&self) -> String {
        self.name.to_owned()
    }

    /// The normalization options described by this config.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            system_permission_flags: self.system_permissions.clone(),
            lookup_batch_size: self.lookup_batch_size,
            concurrent_lookups: self.concurrent_lookups,
        }
    }

    /// Convert this config to a yaml string.
    pub fn to_yaml(&self) -> Result<String> {
        yaml::to_string(self).map_err(anyhow::Error::from)
    }
}

/// Config for the connector used by this project.
#[derive(Clone, Deserialize, Serialize, Default, Debug)]
pub struct ConnectorConfig {
    /// The connector type
    #[serde(rename = "type", default)]
    pub connector_type: String,
    /// Additional configuration, specific to the connector. Scalar values
    /// are kept as their written text, so `api_version: 58.0` reads as
    /// `"58.0"`.
    #[serde(flatten, deserialize_with = "scalars_as_strings")]
    pub config: HashMap<String, String>,
}

/// A yaml scalar of any type.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            // Debug keeps the fractional part of whole numbers: 58.0, not 58
            Scalar::Float(f) => format!("{f:?}"),
            Scalar::Text(t) => t,
        }
    }
}

fn scalars_as_strings<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = HashMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into_string())).collect())
}

/// Alias for HashMap to hold credentials information.
pub type CredentialsMap = HashMap<String, String>;

/// Fetch the credentials from the connectors config, keyed by connector name.
pub fn fetch_credentials<P: AsRef<Path>>(path: P) -> Result<HashMap<String, CredentialsMap>> {
    debug!("Trying to read credentials from {:?}", path.as_ref());
    let credentials_raw = fs::read_to_string(path).context("reading credentials file")?;
    let mut config = yaml::from_str::<HashMap<String, CredentialsMap>>(&credentials_raw)
        .context("parsing credentials file")?;

    config
        .pop()
        .ok_or_else(|| anyhow!["failed to generate credentials"])
}
