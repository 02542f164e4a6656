//! Normalization of raw record sets into [`NormalizedProfile`]s.
//!
//! Fetching happens in three stages:
//!
//! 1. profile identities and container ownership. These are required; any
//!    failure here fails the whole request.
//! 2. object grants, field grants, container flags and entity access, fetched
//!    concurrently. Each one degrades to an empty set on failure.
//! 3. entity name resolution, which depends on the entity access grants from
//!    stage 2 and degrades per entity kind.

pub mod aggregate;
pub mod builder;
pub mod containers;
pub mod names;

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::connectors::RecordSource;
use crate::log_runtime;
use crate::logging::{debug, error, info};
use crate::profile::NormalizedProfile;

use aggregate::{aggregate, SourceRecords};
use builder::build_profile;
use containers::ContainerMap;

/// Default number of IDs per name lookup request.
pub const DEFAULT_LOOKUP_BATCH_SIZE: usize = 100;
/// Default number of name lookups allowed in flight at once.
pub const DEFAULT_CONCURRENT_LOOKUPS: usize = 10;

/// Knobs for the data acquisition side of normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// The declared set of system permission flags to fetch. `None` means
    /// ask the source.
    pub system_permission_flags: Option<Vec<String>>,
    /// Maximum number of IDs per name lookup request.
    pub lookup_batch_size: usize,
    /// Maximum number of name lookups in flight at once.
    pub concurrent_lookups: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            system_permission_flags: None,
            lookup_batch_size: DEFAULT_LOOKUP_BATCH_SIZE,
            concurrent_lookups: DEFAULT_CONCURRENT_LOOKUPS,
        }
    }
}

/// Builds normalized profile documents from a record source.
pub struct Normalizer<'a, S: RecordSource + ?Sized> {
    source: &'a S,
    options: NormalizeOptions,
}

impl<'a, S: RecordSource + ?Sized> Normalizer<'a, S> {
    /// Basic constructor
    pub fn new(source: &'a S, options: NormalizeOptions) -> Self {
        Self { source, options }
    }

    /// Fetch and normalize the given profiles.
    ///
    /// The output follows the requested order. Profiles without an owned
    /// permission container are left out, so the output may be shorter than
    /// the input. Output IDs are in the source's canonical form.
    pub async fn normalize_profiles(&self, profile_ids: &[String]) -> Result<Vec<NormalizedProfile>> {
        let mut seen = HashSet::new();
        let requested: Vec<String> = profile_ids
            .iter()
            .map(|id| self.source.canonical_id(id))
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let (identities, ownership) = log_runtime!(
            "fetching profiles and containers",
            futures::try_join!(
                async {
                    self.source
                        .fetch_profiles(&requested)
                        .await
                        .context("fetching profiles")
                },
                async {
                    self.source
                        .fetch_containers(&requested)
                        .await
                        .context("fetching permission containers")
                },
            )?
        );

        let containers = ContainerMap::resolve(&requested, ownership);
        for id in containers.unresolved(&requested) {
            info!("no permission container found for profile {}; skipping", id);
        }
        if containers.is_empty() {
            return Ok(vec![]);
        }
        let container_ids = containers.container_ids();

        let (object_grants, field_grants, container_flags, entity_access) = log_runtime!(
            "fetching grants",
            futures::join!(
                async {
                    or_empty(
                        self.source.fetch_object_grants(&container_ids).await,
                        "object permissions",
                    )
                },
                async {
                    or_empty(
                        self.source.fetch_field_grants(&container_ids).await,
                        "field permissions",
                    )
                },
                async {
                    let flag_names = self.flag_names().await;
                    if flag_names.is_empty() {
                        return vec![];
                    }
                    or_empty(
                        self.source
                            .fetch_container_flags(&container_ids, &flag_names)
                            .await,
                        "system permissions",
                    )
                },
                async {
                    or_empty(
                        self.source.fetch_entity_access(&container_ids).await,
                        "entity access",
                    )
                },
            )
        );

        let names = log_runtime!(
            "resolving entity names",
            names::resolve_entity_names(
                self.source,
                &entity_access,
                self.options.lookup_batch_size,
                self.options.concurrent_lookups,
            )
            .await
        );

        let records = SourceRecords {
            object_grants,
            field_grants,
            container_flags,
            entity_access,
        };
        let bundles = aggregate(&requested, &identities, &containers, records, &names);

        Ok(bundles.into_iter().map(build_profile).collect())
    }

    /// The flag names to fetch: the declared set if there is one, otherwise
    /// whatever the source reports.
    async fn flag_names(&self) -> Vec<String> {
        match &self.options.system_permission_flags {
            Some(flags) => flags.to_owned(),
            None => {
                let flags = or_empty(self.source.fetch_flag_names().await, "system permission names");
                debug!("discovered {} system permission flags", flags.len());
                flags
            }
        }
    }
}

/// Degrade a failed, non-critical fetch to an empty result.
fn or_empty<T>(res: Result<Vec<T>>, what: &str) -> Vec<T> {
    res.unwrap_or_else(|e| {
        error!("unable to fetch {}: {:#}", what, e);
        Default::default()
    })
}
