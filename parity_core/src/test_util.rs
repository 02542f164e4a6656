//! Utilities for testing
//!
#![cfg(test)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::connectors::{
    ContainerFlags, ContainerOwnership, EntityAccessGrant, EntityKind, FieldGrant, NamedEntity,
    ObjectGrant, ProfileIdentity, RecordSource,
};

/// The fetches a [`MockSource`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Fetch {
    Profiles,
    Containers,
    ObjectGrants,
    FieldGrants,
    FlagNames,
    ContainerFlags,
    EntityAccess,
    Names(EntityKind),
}

/// An in-memory record source.
#[derive(Default)]
pub(crate) struct MockSource {
    pub(crate) profiles: Vec<ProfileIdentity>,
    pub(crate) containers: Vec<ContainerOwnership>,
    pub(crate) object_grants: Vec<ObjectGrant>,
    pub(crate) field_grants: Vec<FieldGrant>,
    pub(crate) flag_names: Vec<String>,
    pub(crate) container_flags: Vec<ContainerFlags>,
    pub(crate) entity_access: Vec<EntityAccessGrant>,
    pub(crate) names: HashMap<EntityKind, Vec<NamedEntity>>,
    pub(crate) failing: HashSet<Fetch>,
    lookups: Mutex<Vec<(EntityKind, usize)>>,
    catalogs: Mutex<Vec<EntityKind>>,
}

impl MockSource {
    fn fail_if(&self, fetch: Fetch) -> Result<()> {
        if self.failing.contains(&fetch) {
            Err(anyhow!("{:?} failed", fetch))
        } else {
            Ok(())
        }
    }

    /// The size of every batched name lookup made for a kind.
    pub(crate) fn lookup_batch_sizes(&self, kind: EntityKind) -> Vec<usize> {
        self.lookups
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, n)| *n)
            .collect()
    }

    /// The number of whole-catalog fetches made for a kind.
    pub(crate) fn catalog_fetches(&self, kind: EntityKind) -> usize {
        self.catalogs
            .lock()
            .unwrap()
            .iter()
            .filter(|k| **k == kind)
            .count()
    }
}

fn contains(ids: &[String], id: &str) -> bool {
    ids.iter().any(|i| i == id)
}

#[async_trait]
impl RecordSource for MockSource {
    async fn check(&self) -> bool {
        true
    }

    async fn fetch_profiles(&self, profile_ids: &[String]) -> Result<Vec<ProfileIdentity>> {
        self.fail_if(Fetch::Profiles)?;
        Ok(self
            .profiles
            .iter()
            .filter(|p| contains(profile_ids, &p.id))
            .cloned()
            .collect())
    }

    async fn fetch_containers(&self, profile_ids: &[String]) -> Result<Vec<ContainerOwnership>> {
        self.fail_if(Fetch::Containers)?;
        Ok(self
            .containers
            .iter()
            .filter(|c| contains(profile_ids, &c.profile_id))
            .cloned()
            .collect())
    }

    async fn fetch_object_grants(&self, container_ids: &[String]) -> Result<Vec<ObjectGrant>> {
        self.fail_if(Fetch::ObjectGrants)?;
        Ok(self
            .object_grants
            .iter()
            .filter(|g| contains(container_ids, &g.container_id))
            .cloned()
            .collect())
    }

    async fn fetch_field_grants(&self, container_ids: &[String]) -> Result<Vec<FieldGrant>> {
        self.fail_if(Fetch::FieldGrants)?;
        Ok(self
            .field_grants
            .iter()
            .filter(|g| contains(container_ids, &g.container_id))
            .cloned()
            .collect())
    }

    async fn fetch_flag_names(&self) -> Result<Vec<String>> {
        self.fail_if(Fetch::FlagNames)?;
        Ok(self.flag_names.clone())
    }

    async fn fetch_container_flags(
        &self,
        container_ids: &[String],
        flag_names: &[String],
    ) -> Result<Vec<ContainerFlags>> {
        self.fail_if(Fetch::ContainerFlags)?;
        Ok(self
            .container_flags
            .iter()
            .filter(|f| contains(container_ids, &f.container_id))
            .map(|f| ContainerFlags {
                container_id: f.container_id.to_owned(),
                flags: f
                    .flags
                    .iter()
                    .filter(|(name, _)| contains(flag_names, name))
                    .map(|(k, v)| (k.to_owned(), *v))
                    .collect(),
            })
            .collect())
    }

    async fn fetch_entity_access(&self, container_ids: &[String]) -> Result<Vec<EntityAccessGrant>> {
        self.fail_if(Fetch::EntityAccess)?;
        Ok(self
            .entity_access
            .iter()
            .filter(|g| contains(container_ids, &g.container_id))
            .cloned()
            .collect())
    }

    async fn fetch_entity_names(
        &self,
        kind: EntityKind,
        ids: &[String],
    ) -> Result<Vec<NamedEntity>> {
        self.lookups.lock().unwrap().push((kind, ids.len()));
        self.fail_if(Fetch::Names(kind))?;
        Ok(self
            .names
            .get(&kind)
            .map(|names| {
                names
                    .iter()
                    .filter(|n| contains(ids, &n.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn fetch_entity_catalog(&self, kind: EntityKind) -> Result<Vec<NamedEntity>> {
        self.catalogs.lock().unwrap().push(kind);
        self.fail_if(Fetch::Names(kind))?;
        Ok(self.names.get(&kind).cloned().unwrap_or_default())
    }
}

fn flags(vals: &[(&str, bool)]) -> BTreeMap<String, bool> {
    vals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn access(container: &str, id: &str, kind: &str) -> EntityAccessGrant {
    EntityAccessGrant::new(container.to_owned(), id.to_owned(), kind.to_owned())
}

fn named(id: &str, name: &str) -> NamedEntity {
    NamedEntity::new(id.to_owned(), name.to_owned())
}

/// A small org with two comparable profiles and one without a container.
///
/// | profile          | id              | container       |
/// |------------------|-----------------|-----------------|
/// | System Admin     | 00e000000000001 | 0PS000000000001 |
/// | Standard User    | 00e000000000002 | 0PS000000000002 |
/// | Orphan           | 00e000000000003 | -               |
pub(crate) fn sample_source() -> MockSource {
    let c1 = "0PS000000000001";
    let c2 = "0PS000000000002";
    MockSource {
        profiles: vec![
            ProfileIdentity::new("00e000000000001".to_owned(), "System Administrator".to_owned()),
            ProfileIdentity::new("00e000000000002".to_owned(), "Standard User".to_owned()),
            ProfileIdentity::new("00e000000000003".to_owned(), "Orphan".to_owned()),
        ],
        containers: vec![
            ContainerOwnership::new(c1.to_owned(), "00e000000000001".to_owned()),
            ContainerOwnership::new(c2.to_owned(), "00e000000000002".to_owned()),
        ],
        object_grants: vec![
            ObjectGrant {
                container_id: c1.to_owned(),
                object_name: "Account".to_owned(),
                create: true,
                read: true,
                edit: true,
                delete: true,
                view_all: true,
                modify_all: true,
            },
            ObjectGrant {
                container_id: c2.to_owned(),
                object_name: "Account".to_owned(),
                create: true,
                read: true,
                edit: true,
                ..Default::default()
            },
            ObjectGrant {
                container_id: c1.to_owned(),
                object_name: "Contact".to_owned(),
                read: true,
                ..Default::default()
            },
        ],
        field_grants: vec![
            FieldGrant {
                container_id: c1.to_owned(),
                object_name: "Account".to_owned(),
                field_name: "Account.Rating".to_owned(),
                read: true,
                edit: true,
            },
            FieldGrant {
                container_id: c2.to_owned(),
                object_name: "Account".to_owned(),
                field_name: "Account.Rating".to_owned(),
                read: true,
                edit: false,
            },
        ],
        flag_names: vec!["ApiEnabled".to_owned(), "ViewSetup".to_owned()],
        container_flags: vec![
            ContainerFlags {
                container_id: c1.to_owned(),
                flags: flags(&[("ApiEnabled", true), ("ViewSetup", true)]),
            },
            ContainerFlags {
                container_id: c2.to_owned(),
                flags: flags(&[("ApiEnabled", true), ("ViewSetup", false)]),
            },
        ],
        entity_access: vec![
            access(c1, "01p000000000001", "ApexClass"),
            access(c1, "01p000000000002", "ApexClass"),
            access(c2, "01p000000000002", "ApexClass"),
            access(c1, "066000000000001", "ApexPage"),
            access(c1, "012000000000001", "RecordType"),
            access(c2, "012000000000001", "RecordType"),
            access(c1, "02u000000000001", "TabSet"),
            access(c2, "01r000000000001", "CustomTab"),
            access(c1, "0CP000000000001", "CustomPermission"),
        ],
        names: HashMap::from([
            (
                EntityKind::ApexClass,
                vec![
                    named("01p000000000001", "Utils"),
                    named("01p000000000002", "AccountService"),
                ],
            ),
            (
                EntityKind::ApexPage,
                vec![named("066000000000001", "AccountOverview")],
            ),
            (
                EntityKind::RecordType,
                vec![named("012000000000001", "Account.Business")],
            ),
            (EntityKind::TabSet, vec![named("02u000000000001", "Sales")]),
            (
                EntityKind::CustomTab,
                vec![named("01r000000000001", "Invoices")],
            ),
        ]),
        ..Default::default()
    }
}
