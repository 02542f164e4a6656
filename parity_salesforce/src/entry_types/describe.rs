use serde::Deserialize;

use crate::consts::FLAG_COLUMN_PREFIX;

/// The parts of an sObject describe parity cares about.
#[derive(Clone, Default, Deserialize, Debug)]
pub struct SObjectDescribe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
}

#[derive(Clone, Default, Deserialize, Debug)]
pub struct FieldDescribe {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl SObjectDescribe {
    /// Names of the boolean `Permissions*` columns, without the prefix.
    pub fn permission_flags(&self) -> Vec<String> {
        let mut flags: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.field_type == "boolean")
            .filter_map(|f| f.name.strip_prefix(FLAG_COLUMN_PREFIX))
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        flags.sort();
        flags
    }
}
