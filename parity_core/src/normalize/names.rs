//! Resolution of entity IDs in access grants to display names.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;
use futures::{future::BoxFuture, FutureExt, StreamExt};

use crate::connectors::{EntityAccessGrant, EntityKind, LookupStrategy, NamedEntity, RecordSource};
use crate::logging::{debug, error};

/// ID -> name maps, one per entity kind.
#[derive(Debug, Default, Clone)]
pub struct EntityNames {
    names: HashMap<EntityKind, HashMap<String, String>>,
}

impl EntityNames {
    /// The display name for an entity, if it could be resolved.
    pub fn resolve(&self, kind: EntityKind, id: &str) -> Option<&str> {
        self.names
            .get(&kind)
            .and_then(|m| m.get(id))
            .map(String::as_str)
    }

    /// Add a batch of resolved names for a kind.
    pub fn extend(&mut self, kind: EntityKind, entities: Vec<NamedEntity>) {
        self.names
            .entry(kind)
            .or_default()
            .extend(entities.into_iter().map(|e| (e.id, e.name)));
    }

    /// Number of names resolved for a kind.
    pub fn len_for(&self, kind: EntityKind) -> usize {
        self.names.get(&kind).map(HashMap::len).unwrap_or_default()
    }
}

type LookupResult = (EntityKind, Result<Vec<NamedEntity>>);

/// Resolve the names of every entity referenced by `grants`.
///
/// Batched kinds are looked up `batch_size` IDs at a time, catalog kinds are
/// fetched whole. At most `concurrency` lookups are in flight. If any lookup
/// for a kind fails, that kind resolves to nothing at all.
pub(crate) async fn resolve_entity_names<S: RecordSource + ?Sized>(
    source: &S,
    grants: &[EntityAccessGrant],
    batch_size: usize,
    concurrency: usize,
) -> EntityNames {
    let mut referenced: HashMap<EntityKind, BTreeSet<String>> = HashMap::new();
    for grant in grants {
        match grant.kind() {
            Some(kind) => {
                referenced
                    .entry(kind)
                    .or_default()
                    .insert(grant.entity_id.to_owned());
            }
            None => debug!("ignoring grant of unknown type {}", grant.entity_type),
        }
    }

    let mut lookups: Vec<BoxFuture<'_, LookupResult>> = vec![];
    for kind in EntityKind::ALL {
        let ids = match referenced.remove(&kind) {
            Some(ids) => ids.into_iter().collect::<Vec<_>>(),
            None => continue,
        };
        match kind.lookup_strategy() {
            LookupStrategy::Batched => {
                for batch in ids.chunks(batch_size.max(1)) {
                    let batch = batch.to_vec();
                    lookups.push(
                        async move { (kind, source.fetch_entity_names(kind, &batch).await) }
                            .boxed(),
                    );
                }
            }
            LookupStrategy::Catalog => {
                lookups.push(async move { (kind, source.fetch_entity_catalog(kind).await) }.boxed());
            }
        }
    }

    let results = futures::stream::iter(lookups)
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut names = EntityNames::default();
    let mut failed = HashSet::new();
    for (kind, res) in results {
        match res {
            Ok(entities) => names.extend(kind, entities),
            Err(e) => {
                error!("unable to resolve {} names: {:#}", kind, e);
                failed.insert(kind);
            }
        }
    }
    for kind in failed {
        names.names.remove(&kind);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{Fetch, MockSource};

    fn grant(id: &str, kind: &str) -> EntityAccessGrant {
        EntityAccessGrant::new("C1".to_owned(), id.to_owned(), kind.to_owned())
    }

    fn named(id: &str, name: &str) -> NamedEntity {
        NamedEntity::new(id.to_owned(), name.to_owned())
    }

    #[tokio::test]
    async fn batched_lookups_respect_batch_size() {
        let mut source = MockSource::default();
        let classes = (0..7)
            .map(|i| named(&format!("01p{i}"), &format!("Class{i}")))
            .collect::<Vec<_>>();
        source.names.insert(EntityKind::ApexClass, classes);
        let grants = (0..7)
            .map(|i| grant(&format!("01p{i}"), "ApexClass"))
            .collect::<Vec<_>>();

        let names = resolve_entity_names(&source, &grants, 3, 2).await;

        assert_eq!(names.len_for(EntityKind::ApexClass), 7);
        let mut sizes = source.lookup_batch_sizes(EntityKind::ApexClass);
        sizes.sort();
        assert_eq!(sizes, vec![1, 3, 3]);
    }

    #[tokio::test]
    async fn catalog_kinds_are_fetched_once() {
        let mut source = MockSource::default();
        source.names.insert(
            EntityKind::RecordType,
            vec![named("012A", "Account.Business"), named("012B", "Case.Support")],
        );
        let grants = vec![grant("012A", "RecordType")];

        let names = resolve_entity_names(&source, &grants, 100, 10).await;

        assert_eq!(
            names.resolve(EntityKind::RecordType, "012A"),
            Some("Account.Business")
        );
        // the whole catalog is loaded, not just the referenced IDs
        assert_eq!(names.len_for(EntityKind::RecordType), 2);
        assert_eq!(source.catalog_fetches(EntityKind::RecordType), 1);
    }

    #[tokio::test]
    async fn failed_kind_degrades_to_empty() {
        let mut source = MockSource::default();
        source
            .names
            .insert(EntityKind::ApexPage, vec![named("066A", "LandingPage")]);
        source
            .names
            .insert(EntityKind::ApexClass, vec![named("01pA", "Utils")]);
        source.failing.insert(Fetch::Names(EntityKind::ApexPage));
        let grants = vec![grant("066A", "ApexPage"), grant("01pA", "ApexClass")];

        let names = resolve_entity_names(&source, &grants, 100, 10).await;

        assert_eq!(names.resolve(EntityKind::ApexPage, "066A"), None);
        assert_eq!(names.resolve(EntityKind::ApexClass, "01pA"), Some("Utils"));
    }

    #[tokio::test]
    async fn unreferenced_and_unknown_kinds_are_not_looked_up() {
        let source = MockSource::default();
        let grants = vec![grant("0CP1", "CustomPermission")];

        let names = resolve_entity_names(&source, &grants, 100, 10).await;

        assert_eq!(names.len_for(EntityKind::ApexClass), 0);
        assert_eq!(source.catalog_fetches(EntityKind::TabSet), 0);
        assert!(source.lookup_batch_sizes(EntityKind::ApexClass).is_empty());
    }
}
