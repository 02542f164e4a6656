//! Path utilities for project organization.
//!
//! A project looks like this:
//!
//! ```text
//! pwd
//!  └── parity.yaml
//!
//! ~
//!  └── .parity
//!       └── connectors.yaml
//! ```

use std::path::PathBuf;

use dirs::home_dir;
use lazy_static::lazy_static;

lazy_static! {
    static ref PARITY_CFG: PathBuf = PathBuf::from("parity.yaml");
    static ref CONNECTOR_CFG: PathBuf = PathBuf::from("connectors.yaml");
    static ref PROFILE_CFG_DIR: PathBuf = PathBuf::from(".parity");
}

/// Local path for the project config.
pub fn parity_cfg_path_local() -> PathBuf {
    PARITY_CFG.to_owned()
}

/// The directory holding user-level configuration, such as credentials.
pub fn user_cfg_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROFILE_CFG_DIR.as_path())
}

/// The default path to the connector credentials file.
pub fn connector_cfg_path() -> PathBuf {
    user_cfg_dir().join(CONNECTOR_CFG.as_path())
}
