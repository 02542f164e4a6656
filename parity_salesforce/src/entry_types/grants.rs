use parity_core::connectors::{EntityAccessGrant, FieldGrant, ObjectGrant};
use serde::Deserialize;

/// Salesforce ObjectPermissions entry.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase", default)]
pub struct ObjectPermissionsRow {
    /// The owning PermissionSet
    pub parent_id: String,
    pub sobject_type: String,
    pub permissions_create: bool,
    pub permissions_read: bool,
    pub permissions_edit: bool,
    pub permissions_delete: bool,
    pub permissions_view_all_records: bool,
    pub permissions_modify_all_records: bool,
}

impl From<ObjectPermissionsRow> for ObjectGrant {
    fn from(val: ObjectPermissionsRow) -> Self {
        ObjectGrant {
            container_id: val.parent_id,
            object_name: val.sobject_type,
            create: val.permissions_create,
            read: val.permissions_read,
            edit: val.permissions_edit,
            delete: val.permissions_delete,
            view_all: val.permissions_view_all_records,
            modify_all: val.permissions_modify_all_records,
        }
    }
}

/// Salesforce FieldPermissions entry. `Field` is `Object.Field`.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase", default)]
pub struct FieldPermissionsRow {
    pub parent_id: String,
    pub sobject_type: String,
    pub field: String,
    pub permissions_read: bool,
    pub permissions_edit: bool,
}

impl From<FieldPermissionsRow> for FieldGrant {
    fn from(val: FieldPermissionsRow) -> Self {
        FieldGrant {
            container_id: val.parent_id,
            object_name: val.sobject_type,
            field_name: val.field,
            read: val.permissions_read,
            edit: val.permissions_edit,
        }
    }
}

/// Salesforce SetupEntityAccess entry.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SetupEntityAccessRow {
    pub parent_id: String,
    pub setup_entity_id: String,
    pub setup_entity_type: String,
}

impl From<SetupEntityAccessRow> for EntityAccessGrant {
    fn from(val: SetupEntityAccessRow) -> Self {
        EntityAccessGrant::new(val.parent_id, val.setup_entity_id, val.setup_entity_type)
    }
}
