//! The canonical, comparable profile document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{ser::SerializeStruct, Deserialize, Serialize, Serializer};

/// Tab state for every tab a profile includes.
pub const TAB_VISIBLE: &str = "Visible";
/// Tab state for every tab a profile doesn't include. Never materialized in a
/// profile, only used when comparing.
pub const TAB_HIDDEN: &str = "Hidden";

/// The six object-level permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectPermission {
    /// Read records
    Read,
    /// Create records
    Create,
    /// Edit records
    Edit,
    /// Delete records
    Delete,
    /// Read all records regardless of sharing
    ViewAll,
    /// Write all records regardless of sharing
    ModifyAll,
}

impl ObjectPermission {
    /// All object permissions, in comparison order.
    pub const ALL: [ObjectPermission; 6] = [
        ObjectPermission::Read,
        ObjectPermission::Create,
        ObjectPermission::Edit,
        ObjectPermission::Delete,
        ObjectPermission::ViewAll,
        ObjectPermission::ModifyAll,
    ];

    /// The name used in paths and serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectPermission::Read => "read",
            ObjectPermission::Create => "create",
            ObjectPermission::Edit => "edit",
            ObjectPermission::Delete => "delete",
            ObjectPermission::ViewAll => "viewAll",
            ObjectPermission::ModifyAll => "modifyAll",
        }
    }
}

/// The two field-level permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPermission {
    /// Read the field
    Read,
    /// Edit the field
    Edit,
}

impl FieldPermission {
    /// All field permissions, in comparison order.
    pub const ALL: [FieldPermission; 2] = [FieldPermission::Read, FieldPermission::Edit];

    /// The name used in paths and serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPermission::Read => "read",
            FieldPermission::Edit => "edit",
        }
    }
}

/// CRUD-style access to an object.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectPermissions {
    /// Read records
    pub read: bool,
    /// Create records
    pub create: bool,
    /// Edit records
    pub edit: bool,
    /// Delete records
    pub delete: bool,
    /// Read all records regardless of sharing
    pub view_all: bool,
    /// Write all records regardless of sharing
    pub modify_all: bool,
}

impl ObjectPermissions {
    /// Get a single permission.
    pub fn get(&self, permission: ObjectPermission) -> bool {
        match permission {
            ObjectPermission::Read => self.read,
            ObjectPermission::Create => self.create,
            ObjectPermission::Edit => self.edit,
            ObjectPermission::Delete => self.delete,
            ObjectPermission::ViewAll => self.view_all,
            ObjectPermission::ModifyAll => self.modify_all,
        }
    }
}

/// Read/edit access to a field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPermissions {
    /// Read the field
    pub read: bool,
    /// Edit the field
    pub edit: bool,
}

impl FieldPermissions {
    /// Get a single permission.
    pub fn get(&self, permission: FieldPermission) -> bool {
        match permission {
            FieldPermission::Read => self.read,
            FieldPermission::Edit => self.edit,
        }
    }
}

/// Everything a profile can do with one object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectAccess {
    /// Object-level permissions
    pub permissions: ObjectPermissions,
    /// Field-level permissions, keyed by bare field name
    pub fields: BTreeMap<String, FieldPermissions>,
}

/// Visibility of an application.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppVisibility {
    /// Whether the app is visible to the profile
    pub visible: bool,
    /// Whether the app is the profile's default
    #[serde(rename = "default")]
    pub is_default: bool,
}

/// A profile, reshaped into a canonical, comparable document.
///
/// Every set-valued collection is a `BTreeSet`, so members are always
/// deduplicated and in ascending order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedProfile {
    /// Profile identifier
    pub profile_id: String,
    /// Profile display name
    pub profile_name: String,
    /// Object name to access
    pub objects: BTreeMap<String, ObjectAccess>,
    /// Org-wide flags. Also exposed as `userPermissions`.
    pub system_permissions: BTreeMap<String, bool>,
    /// Accessible Apex classes
    pub apex_classes: BTreeSet<String>,
    /// Accessible Visualforce pages
    pub visualforce_pages: BTreeSet<String>,
    /// Accessible Lightning pages
    pub lightning_pages: BTreeSet<String>,
    /// Accessible record types, as `Object.DeveloperName`
    pub record_types: BTreeSet<String>,
    /// Tab name to tab state. Only visible tabs are present.
    pub tab_visibilities: BTreeMap<String, String>,
    /// Granted applications
    pub app_visibilities: BTreeMap<String, AppVisibility>,
}

impl NormalizedProfile {
    /// The user permissions of this profile. This is the same data as
    /// `system_permissions`, not a separate permission space.
    pub fn user_permissions(&self) -> &BTreeMap<String, bool> {
        &self.system_permissions
    }

    /// Tab state for a tab, defaulting to hidden.
    pub fn tab_state(&self, tab: &str) -> &str {
        self.tab_visibilities
            .get(tab)
            .map(String::as_str)
            .unwrap_or(TAB_HIDDEN)
    }
}

impl Serialize for NormalizedProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NormalizedProfile", 11)?;
        state.serialize_field("profileId", &self.profile_id)?;
        state.serialize_field("profileName", &self.profile_name)?;
        state.serialize_field("objects", &self.objects)?;
        state.serialize_field("systemPermissions", &self.system_permissions)?;
        state.serialize_field("userPermissions", &self.system_permissions)?;
        state.serialize_field("apexClasses", &self.apex_classes)?;
        state.serialize_field("visualforcePages", &self.visualforce_pages)?;
        state.serialize_field("lightningPages", &self.lightning_pages)?;
        state.serialize_field("recordTypes", &self.record_types)?;
        state.serialize_field("tabVisibilities", &self.tab_visibilities)?;
        state.serialize_field("appVisibilities", &self.app_visibilities)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use maplit::{btreemap, btreeset};

    use super::*;

    #[test]
    fn serialized_profile_exposes_user_permissions() -> Result<()> {
        let profile = NormalizedProfile {
            profile_id: "00e000000000001".to_owned(),
            profile_name: "Admin".to_owned(),
            system_permissions: btreemap! {"ApiEnabled".to_owned() => true},
            apex_classes: btreeset! {"Utils".to_owned()},
            ..Default::default()
        };
        let val = serde_json::to_value(&profile)?;
        assert_eq!(val["systemPermissions"], val["userPermissions"]);
        assert_eq!(val["apexClasses"], serde_json::json!(["Utils"]));
        assert_eq!(val["profileName"], "Admin");
        Ok(())
    }

    #[test]
    fn saved_profile_reads_back() -> Result<()> {
        let profile = NormalizedProfile {
            profile_id: "00e000000000001".to_owned(),
            profile_name: "Admin".to_owned(),
            objects: btreemap! {
                "Account".to_owned() => ObjectAccess {
                    permissions: ObjectPermissions { read: true, ..Default::default() },
                    fields: btreemap! {"Name".to_owned() => FieldPermissions { read: true, edit: false }},
                }
            },
            app_visibilities: btreemap! {
                "Sales".to_owned() => AppVisibility { visible: true, is_default: false }
            },
            ..Default::default()
        };
        let raw = serde_json::to_string(&profile)?;
        let back: NormalizedProfile = serde_json::from_str(&raw)?;
        assert_eq!(back, profile);
        Ok(())
    }

    #[test]
    fn missing_tab_is_hidden() {
        let profile = NormalizedProfile {
            tab_visibilities: btreemap! {"Accounts".to_owned() => TAB_VISIBLE.to_owned()},
            ..Default::default()
        };
        assert_eq!(profile.tab_state("Accounts"), TAB_VISIBLE);
        assert_eq!(profile.tab_state("Leads"), TAB_HIDDEN);
    }
}
