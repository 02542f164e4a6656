//! Rows as returned by the Salesforce query API.
//!
//! Each row converts into the matching source-agnostic record from
//! `parity_core::connectors`.

mod describe;
mod grants;
mod metadata;
mod profile;

pub use describe::{FieldDescribe, SObjectDescribe};
pub use grants::{FieldPermissionsRow, ObjectPermissionsRow, SetupEntityAccessRow};
pub use metadata::{AppMenuItemRow, DeveloperNameRow, NameRow, RecordTypeRow};
pub use profile::{OwnedPermissionSetRow, PermissionSetFlagsRow, ProfileRow};
