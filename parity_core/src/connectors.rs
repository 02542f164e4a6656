//! The seam between Parity and the platforms it reads from.
//!
//! A [`RecordSource`] hands back raw, foreign-key-linked record sets. It is
//! strictly read-only: nothing in this trait writes back to the platform.

pub mod records;

use anyhow::Result;
use async_trait::async_trait;

pub use records::{
    ContainerFlags, ContainerOwnership, EntityAccessGrant, EntityKind, FieldGrant, LookupStrategy,
    NamedEntity, ObjectGrant, ProfileIdentity,
};

/// The trait all record sources are expected to implement.
///
/// Every method is scoped to the IDs it is handed. Implementations should
/// not cache across calls; a comparison request owns everything it fetches.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Check if the source is properly set up and return the connection
    /// status (true for connected, false for not).
    async fn check(&self) -> bool;

    /// The form of a profile ID that this source reports back in its
    /// records. Requested IDs are rewritten with this before fetching so
    /// they can be matched against returned rows.
    fn canonical_id(&self, id: &str) -> String {
        id.to_owned()
    }

    /// Fetch identity rows for the given profile IDs.
    async fn fetch_profiles(&self, profile_ids: &[String]) -> Result<Vec<ProfileIdentity>>;

    /// Fetch the permission containers owned by the given profiles.
    async fn fetch_containers(&self, profile_ids: &[String]) -> Result<Vec<ContainerOwnership>>;

    /// Fetch object-level grants for the given containers.
    async fn fetch_object_grants(&self, container_ids: &[String]) -> Result<Vec<ObjectGrant>>;

    /// Fetch field-level grants for the given containers. Only rows with at
    /// least one granted permission are returned.
    async fn fetch_field_grants(&self, container_ids: &[String]) -> Result<Vec<FieldGrant>>;

    /// Discover the boolean flag names carried by containers.
    async fn fetch_flag_names(&self) -> Result<Vec<String>>;

    /// Fetch the named boolean flags for the given containers.
    async fn fetch_container_flags(
        &self,
        container_ids: &[String],
        flag_names: &[String],
    ) -> Result<Vec<ContainerFlags>>;

    /// Fetch generic entity access grants for the given containers.
    async fn fetch_entity_access(&self, container_ids: &[String]) -> Result<Vec<EntityAccessGrant>>;

    /// Look up names for a set of entity IDs of a single kind.
    async fn fetch_entity_names(&self, kind: EntityKind, ids: &[String])
        -> Result<Vec<NamedEntity>>;

    /// Fetch the complete catalog of entities of a single kind.
    async fn fetch_entity_catalog(&self, kind: EntityKind) -> Result<Vec<NamedEntity>>;
}
