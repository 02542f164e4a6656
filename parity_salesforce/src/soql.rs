//! SOQL for every record set the connector reads.

use parity_core::connectors::EntityKind;

use crate::consts::FLAG_COLUMN_PREFIX;
use crate::rest::QueryApi;

/// Quote a value as a SOQL string literal.
pub(crate) fn quote(val: &str) -> String {
    format!("'{}'", val.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `('a','b')`
pub(crate) fn in_list(ids: &[String]) -> String {
    let quoted: Vec<String> = ids.iter().map(|id| quote(id)).collect();
    format!("({})", quoted.join(","))
}

pub(crate) fn profiles(ids: &[String]) -> String {
    format!("SELECT Id, Name FROM Profile WHERE Id IN {}", in_list(ids))
}

pub(crate) fn owned_permission_sets(profile_ids: &[String]) -> String {
    format!(
        "SELECT Id, ProfileId FROM PermissionSet WHERE IsOwnedByProfile = true AND ProfileId IN {}",
        in_list(profile_ids)
    )
}

pub(crate) fn object_permissions(container_ids: &[String]) -> String {
    format!(
        "SELECT ParentId, SobjectType, PermissionsCreate, PermissionsRead, PermissionsEdit, \
         PermissionsDelete, PermissionsViewAllRecords, PermissionsModifyAllRecords \
         FROM ObjectPermissions WHERE ParentId IN {}",
        in_list(container_ids)
    )
}

/// Only rows granting something come back.
pub(crate) fn field_permissions(container_ids: &[String]) -> String {
    format!(
        "SELECT ParentId, SobjectType, Field, PermissionsRead, PermissionsEdit \
         FROM FieldPermissions WHERE ParentId IN {} \
         AND (PermissionsRead = true OR PermissionsEdit = true)",
        in_list(container_ids)
    )
}

pub(crate) fn permission_set_flags(container_ids: &[String], flag_names: &[String]) -> String {
    let columns: Vec<String> = flag_names
        .iter()
        .map(|name| format!("{FLAG_COLUMN_PREFIX}{name}"))
        .collect();
    format!(
        "SELECT Id, {} FROM PermissionSet WHERE Id IN {}",
        columns.join(", "),
        in_list(container_ids)
    )
}

pub(crate) fn setup_entity_access(container_ids: &[String]) -> String {
    format!(
        "SELECT ParentId, SetupEntityId, SetupEntityType FROM SetupEntityAccess WHERE ParentId IN {}",
        in_list(container_ids)
    )
}

/// Name lookup for the batched kinds. `None` for catalog kinds.
pub(crate) fn entity_names(kind: EntityKind, ids: &[String]) -> Option<String> {
    let table = match kind {
        EntityKind::ApexClass => "ApexClass",
        EntityKind::ApexPage => "ApexPage",
        _ => return None,
    };
    Some(format!(
        "SELECT Id, Name FROM {} WHERE Id IN {}",
        table,
        in_list(ids)
    ))
}

/// Whole catalog of a kind, and the API that serves it. `None` for the
/// batched kinds, which are too large to read whole.
pub(crate) fn entity_catalog(kind: EntityKind) -> Option<(QueryApi, String)> {
    let catalog = match kind {
        EntityKind::ApexClass | EntityKind::ApexPage => return None,
        EntityKind::FlexiPage => (
            QueryApi::Tooling,
            "SELECT Id, DeveloperName FROM FlexiPage".to_owned(),
        ),
        EntityKind::RecordType => (
            QueryApi::Data,
            "SELECT Id, DeveloperName, SobjectType FROM RecordType".to_owned(),
        ),
        EntityKind::TabSet => (
            QueryApi::Data,
            "SELECT ApplicationId, Name FROM AppMenuItem WHERE Type = 'TabSet'".to_owned(),
        ),
        EntityKind::CustomTab => (
            QueryApi::Tooling,
            "SELECT Id, DeveloperName FROM CustomTab".to_owned(),
        ),
    };
    Some(catalog)
}
