//! Records to be received from record sources
use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// A profile as known by the source platform.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileIdentity {
    /// Opaque profile identifier
    pub id: String,
    /// Human-readable profile name
    pub display_name: String,
}

impl ProfileIdentity {
    /// Basic constructor
    pub fn new(id: String, display_name: String) -> Self {
        Self { id, display_name }
    }
}

/// Links a permission container to the profile that owns it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContainerOwnership {
    /// The container carrying the grant records
    pub container_id: String,
    /// The owning profile
    pub profile_id: String,
}

impl ContainerOwnership {
    /// Basic constructor
    pub fn new(container_id: String, profile_id: String) -> Self {
        Self {
            container_id,
            profile_id,
        }
    }
}

/// CRUD-style access to one object, for one container.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ObjectGrant {
    /// The owning container
    pub container_id: String,
    /// The object these permissions apply to
    pub object_name: String,
    /// Create records
    pub create: bool,
    /// Read records
    pub read: bool,
    /// Edit records
    pub edit: bool,
    /// Delete records
    pub delete: bool,
    /// Read access to all records regardless of sharing
    pub view_all: bool,
    /// Write access to all records regardless of sharing
    pub modify_all: bool,
}

/// Read/edit access to one field of an object, for one container.
///
/// `field_name` is usually the composite `Object.Field` form the source
/// reports.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldGrant {
    /// The owning container
    pub container_id: String,
    /// The object the field belongs to
    pub object_name: String,
    /// The field, typically as `Object.Field`
    pub field_name: String,
    /// Read the field
    pub read: bool,
    /// Edit the field
    pub edit: bool,
}

/// The boolean flags carried directly by a container.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContainerFlags {
    /// The owning container
    pub container_id: String,
    /// Flag name to value
    pub flags: BTreeMap<String, bool>,
}

/// A typed pointer from a container to some setup entity.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntityAccessGrant {
    /// The owning container
    pub container_id: String,
    /// The opaque entity ID; meaningless until resolved to a name
    pub entity_id: String,
    /// The type string as the source reports it
    pub entity_type: String,
}

impl EntityAccessGrant {
    /// Basic constructor
    pub fn new(container_id: String, entity_id: String, entity_type: String) -> Self {
        Self {
            container_id,
            entity_id,
            entity_type,
        }
    }

    /// The kind of entity this grant points to, if it's one Parity understands.
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::parse(&self.entity_type)
    }
}

/// An (ID, display name) pair from a name lookup or catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NamedEntity {
    /// Entity identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl NamedEntity {
    /// Basic constructor
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}

/// How names for an entity kind are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Look up only the referenced IDs, in bounded batches.
    Batched,
    /// Fetch the whole (small) catalog once.
    Catalog,
}

/// The entity kinds an access grant can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Apex class
    ApexClass,
    /// Visualforce page
    ApexPage,
    /// Lightning page
    FlexiPage,
    /// Record type
    RecordType,
    /// Application
    TabSet,
    /// Custom tab
    CustomTab,
}

impl EntityKind {
    /// Every kind, in resolution order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::ApexClass,
        EntityKind::ApexPage,
        EntityKind::FlexiPage,
        EntityKind::RecordType,
        EntityKind::TabSet,
        EntityKind::CustomTab,
    ];

    /// Parse the source's type string. Unknown types yield `None`.
    pub fn parse(val: &str) -> Option<Self> {
        match val {
            "ApexClass" => Some(EntityKind::ApexClass),
            "ApexPage" => Some(EntityKind::ApexPage),
            "FlexiPage" => Some(EntityKind::FlexiPage),
            "RecordType" => Some(EntityKind::RecordType),
            "TabSet" => Some(EntityKind::TabSet),
            "CustomTab" => Some(EntityKind::CustomTab),
            _ => None,
        }
    }

    /// The source's type string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ApexClass => "ApexClass",
            EntityKind::ApexPage => "ApexPage",
            EntityKind::FlexiPage => "FlexiPage",
            EntityKind::RecordType => "RecordType",
            EntityKind::TabSet => "TabSet",
            EntityKind::CustomTab => "CustomTab",
        }
    }

    /// Classes and pages can be numerous, so only referenced IDs are looked
    /// up. Everything else has a small catalog.
    pub fn lookup_strategy(&self) -> LookupStrategy {
        match self {
            EntityKind::ApexClass | EntityKind::ApexPage => LookupStrategy::Batched,
            _ => LookupStrategy::Catalog,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
