//! Profile <-> permission container resolution.
//!
//! Every grant record is keyed by container, never by profile, so this
//! mapping is the root everything else hangs off of.

use std::collections::HashSet;

use bimap::BiHashMap;

use crate::connectors::ContainerOwnership;
use crate::logging::debug;

/// Bidirectional mapping between requested profiles and their owned containers.
#[derive(Debug, Default, Clone)]
pub struct ContainerMap {
    /// profile id <-> container id
    map: BiHashMap<String, String>,
}

impl ContainerMap {
    /// Build the mapping from ownership rows, keeping only rows for requested
    /// profiles. A profile owns at most one container: if the source reports
    /// more, the first one wins.
    pub fn resolve(requested: &[String], rows: Vec<ContainerOwnership>) -> Self {
        let requested: HashSet<&String> = requested.iter().collect();
        let mut map = BiHashMap::new();

        for row in rows {
            if !requested.contains(&row.profile_id) {
                debug!(
                    "skipping container {} for unrequested profile {}",
                    row.container_id, row.profile_id
                );
                continue;
            }
            if let Err((profile_id, container_id)) =
                map.insert_no_overwrite(row.profile_id, row.container_id)
            {
                debug!(
                    "ignoring additional container {} for profile {}",
                    container_id, profile_id
                );
            }
        }

        Self { map }
    }

    /// The container owned by a profile.
    pub fn container_for(&self, profile_id: &str) -> Option<&str> {
        self.map.get_by_left(profile_id).map(String::as_str)
    }

    /// The profile owning a container.
    pub fn profile_for(&self, container_id: &str) -> Option<&str> {
        self.map.get_by_right(container_id).map(String::as_str)
    }

    /// All resolved container IDs, sorted.
    pub fn container_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.map.right_values().cloned().collect();
        ids.sort();
        ids
    }

    /// The requested profiles that have no owned container.
    pub fn unresolved<'a>(&self, requested: &'a [String]) -> Vec<&'a String> {
        requested
            .iter()
            .filter(|id| !self.map.contains_left(*id))
            .collect()
    }

    /// Number of resolved profiles
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no profile resolved to a container
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
