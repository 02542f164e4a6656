//! Grouping of container-keyed records into one bundle per profile.

use std::collections::{BTreeMap, HashMap};

use crate::connectors::{
    ContainerFlags, EntityAccessGrant, EntityKind, FieldGrant, ObjectGrant, ProfileIdentity,
};
use crate::logging::debug;

use super::containers::ContainerMap;
use super::names::EntityNames;

/// Raw record sets fetched for a set of containers.
#[derive(Debug, Default, Clone)]
pub struct SourceRecords {
    /// Object-level grants
    pub object_grants: Vec<ObjectGrant>,
    /// Field-level grants
    pub field_grants: Vec<FieldGrant>,
    /// Boolean flags per container
    pub container_flags: Vec<ContainerFlags>,
    /// Setup entity access grants
    pub entity_access: Vec<EntityAccessGrant>,
}

/// Everything known about a single profile, before normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileBundle {
    /// Profile identifier
    pub profile_id: String,
    /// Profile display name
    pub profile_name: String,
    /// Object-level grants
    pub object_grants: Vec<ObjectGrant>,
    /// Field-level grants
    pub field_grants: Vec<FieldGrant>,
    /// System permission flags
    pub flags: BTreeMap<String, bool>,
    /// Resolved apex class names
    pub apex_classes: Vec<String>,
    /// Resolved visualforce page names
    pub visualforce_pages: Vec<String>,
    /// Resolved lightning page names
    pub lightning_pages: Vec<String>,
    /// Resolved record type names
    pub record_types: Vec<String>,
    /// Resolved tab names
    pub tabs: Vec<String>,
    /// Resolved application names
    pub apps: Vec<String>,
}

impl ProfileBundle {
    fn route(&mut self, kind: EntityKind, name: String) {
        let target = match kind {
            EntityKind::ApexClass => &mut self.apex_classes,
            EntityKind::ApexPage => &mut self.visualforce_pages,
            EntityKind::FlexiPage => &mut self.lightning_pages,
            EntityKind::RecordType => &mut self.record_types,
            EntityKind::TabSet => &mut self.apps,
            EntityKind::CustomTab => &mut self.tabs,
        };
        target.push(name);
    }
}

/// Group every record by the profile owning its container.
///
/// Returns one bundle per resolved profile, in requested order. Records whose
/// container isn't mapped, grants of unknown types, and grants whose entity
/// name couldn't be resolved are dropped.
pub fn aggregate(
    requested: &[String],
    identities: &[ProfileIdentity],
    containers: &ContainerMap,
    records: SourceRecords,
    names: &EntityNames,
) -> Vec<ProfileBundle> {
    let display_names: HashMap<&str, &str> = identities
        .iter()
        .map(|p| (p.id.as_str(), p.display_name.as_str()))
        .collect();

    let mut bundles: HashMap<String, ProfileBundle> = requested
        .iter()
        .filter(|id| containers.container_for(id).is_some())
        .map(|id| {
            let name = display_names.get(id.as_str()).copied().unwrap_or_else(|| {
                debug!("no identity row for profile {}; using its id as name", id);
                id.as_str()
            });
            (
                id.to_owned(),
                ProfileBundle {
                    profile_id: id.to_owned(),
                    profile_name: name.to_owned(),
                    ..Default::default()
                },
            )
        })
        .collect();

    let SourceRecords {
        object_grants,
        field_grants,
        container_flags,
        entity_access,
    } = records;

    for grant in object_grants {
        if let Some(bundle) = bundle_for(&mut bundles, containers, &grant.container_id) {
            bundle.object_grants.push(grant);
        }
    }

    for grant in field_grants {
        if let Some(bundle) = bundle_for(&mut bundles, containers, &grant.container_id) {
            bundle.field_grants.push(grant);
        }
    }

    for flags in container_flags {
        if let Some(bundle) = bundle_for(&mut bundles, containers, &flags.container_id) {
            bundle.flags.extend(flags.flags);
        }
    }

    for grant in entity_access {
        let kind = match grant.kind() {
            Some(k) => k,
            None => continue,
        };
        let name = match names.resolve(kind, &grant.entity_id) {
            Some(n) => n.to_owned(),
            None => {
                debug!("dropping unresolved {} grant {}", kind, grant.entity_id);
                continue;
            }
        };
        if let Some(bundle) = bundle_for(&mut bundles, containers, &grant.container_id) {
            bundle.route(kind, name);
        }
    }

    // Preserve the order profiles were requested in
    requested
        .iter()
        .filter_map(|id| bundles.remove(id))
        .collect()
}

fn bundle_for<'a>(
    bundles: &'a mut HashMap<String, ProfileBundle>,
    containers: &ContainerMap,
    container_id: &str,
) -> Option<&'a mut ProfileBundle> {
    match containers.profile_for(container_id) {
        Some(profile_id) => bundles.get_mut(profile_id),
        None => {
            debug!("skipping record for unknown container {}", container_id);
            None
        }
    }
}
