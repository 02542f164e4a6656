use std::collections::HashMap;

use parity_core::connectors::{ContainerFlags, ContainerOwnership, ProfileIdentity};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::consts::FLAG_COLUMN_PREFIX;

/// Salesforce Profile entry.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileRow {
    pub id: String,
    pub name: String,
}

impl From<ProfileRow> for ProfileIdentity {
    fn from(val: ProfileRow) -> Self {
        ProfileIdentity::new(val.id, val.name)
    }
}

/// A PermissionSet owned by a profile.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct OwnedPermissionSetRow {
    pub id: String,
    pub profile_id: String,
}

impl From<OwnedPermissionSetRow> for ContainerOwnership {
    fn from(val: OwnedPermissionSetRow) -> Self {
        ContainerOwnership::new(val.id, val.profile_id)
    }
}

/// A PermissionSet with an arbitrary set of `Permissions*` columns.
#[derive(Clone, Default, Deserialize, Debug)]
pub struct PermissionSetFlagsRow {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(flatten)]
    pub columns: HashMap<String, JsonValue>,
}

impl PermissionSetFlagsRow {
    /// Pull the named flags out of the row. A missing or non-boolean column
    /// reads as false.
    pub fn into_flags(self, flag_names: &[String]) -> ContainerFlags {
        let flags = flag_names
            .iter()
            .map(|name| {
                let value = self
                    .columns
                    .get(&format!("{FLAG_COLUMN_PREFIX}{name}"))
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false);
                (name.to_owned(), value)
            })
            .collect();
        ContainerFlags {
            container_id: self.id,
            flags,
        }
    }
}
