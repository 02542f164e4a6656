//! Salesforce Connector
//!
//! Reads profiles and their permission records from a Salesforce org over the
//! REST query API. The connector never writes to the org.
//!
//! ```no_run
//! use parity_core::config::{ConnectorConfig, CredentialsMap};
//! use parity_salesforce::SalesforceConnector;
//!
//! let config = ConnectorConfig::default();
//! let credentials = CredentialsMap::from([
//!     ("instance_url".to_owned(), "https://acme.my.salesforce.com".to_owned()),
//!     ("access_token".to_owned(), "00D...".to_owned()),
//! ]);
//! let salesforce = SalesforceConnector::new(&config, &credentials);
//! ```

mod consts;
mod creds;
mod entry_types;
mod ids;
mod rest;
mod soql;

pub use entry_types::*;
pub use ids::to_18_char_id;
use rest::{QueryApi, SalesforceRestClient};

use std::collections::HashSet;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use parity_core::{
    config::{ConnectorConfig, CredentialsMap},
    connectors::{
        ContainerFlags, ContainerOwnership, EntityAccessGrant, EntityKind, FieldGrant, NamedEntity,
        ObjectGrant, ProfileIdentity, RecordSource,
    },
    logging::error,
};
use serde::de::DeserializeOwned;

/// The main Salesforce Connector struct.
pub struct SalesforceConnector {
    rest_client: SalesforceRestClient,
}

impl SalesforceConnector {
    /// Validates the configs and bootstraps a Salesforce connection.
    ///
    /// `instance_url` and `access_token` are required in the credentials.
    /// The connector config may set `api_version`.
    pub fn new(config: &ConnectorConfig, credentials: &CredentialsMap) -> Result<Self> {
        let mut conn = creds::SalesforceCredentials::default();
        let mut required_fields: HashSet<_> = vec!["instance_url", "access_token"]
            .into_iter()
            .collect();

        for (k, v) in credentials.iter() {
            match k.as_ref() {
                "instance_url" => conn.instance_url = v.to_string(),
                "access_token" => conn.access_token = v.to_string(),
                _ => (),
            }

            required_fields.remove::<str>(k);
        }

        if !required_fields.is_empty() {
            return Err(anyhow![
                "Salesforce config missing required fields: {:#?}",
                required_fields
            ]);
        }

        let api_version = config
            .config
            .get("api_version")
            .cloned()
            .unwrap_or_else(|| consts::DEFAULT_API_VERSION.to_owned());

        Ok(SalesforceConnector {
            rest_client: SalesforceRestClient::new(conn, api_version)?,
        })
    }

    /// Run a query and convert every row into a core record.
    async fn query_to_obj<R, T>(&self, api: QueryApi, soql: &str) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let rows: Vec<R> = self.rest_client.query(api, soql).await?;
        Ok(rows.into_iter().map(T::from).collect())
    }
}

#[async_trait]
impl RecordSource for SalesforceConnector {
    async fn check(&self) -> bool {
        let res: Result<Vec<serde_json::Value>> = self
            .rest_client
            .query(QueryApi::Data, "SELECT Id FROM Organization LIMIT 1")
            .await;
        match res {
            Err(e) => {
                error!("unable to reach Salesforce: {:#}", e);
                false
            }
            Ok(_) => true,
        }
    }

    fn canonical_id(&self, id: &str) -> String {
        to_18_char_id(id)
    }

    async fn fetch_profiles(&self, profile_ids: &[String]) -> Result<Vec<ProfileIdentity>> {
        if profile_ids.is_empty() {
            return Ok(vec![]);
        }
        self.query_to_obj::<ProfileRow, _>(QueryApi::Data, &soql::profiles(profile_ids))
            .await
            .context("failed to get profiles")
    }

    async fn fetch_containers(&self, profile_ids: &[String]) -> Result<Vec<ContainerOwnership>> {
        if profile_ids.is_empty() {
            return Ok(vec![]);
        }
        self.query_to_obj::<OwnedPermissionSetRow, _>(
            QueryApi::Data,
            &soql::owned_permission_sets(profile_ids),
        )
        .await
        .context("failed to get profile permission sets")
    }

    async fn fetch_object_grants(&self, container_ids: &[String]) -> Result<Vec<ObjectGrant>> {
        if container_ids.is_empty() {
            return Ok(vec![]);
        }
        self.query_to_obj::<ObjectPermissionsRow, _>(
            QueryApi::Data,
            &soql::object_permissions(container_ids),
        )
        .await
        .context("failed to get object permissions")
    }

    async fn fetch_field_grants(&self, container_ids: &[String]) -> Result<Vec<FieldGrant>> {
        if container_ids.is_empty() {
            return Ok(vec![]);
        }
        self.query_to_obj::<FieldPermissionsRow, _>(
            QueryApi::Data,
            &soql::field_permissions(container_ids),
        )
        .await
        .context("failed to get field permissions")
    }

    async fn fetch_flag_names(&self) -> Result<Vec<String>> {
        let described = self
            .rest_client
            .describe("PermissionSet")
            .await
            .context("failed to describe PermissionSet")?;
        Ok(described.permission_flags())
    }

    async fn fetch_container_flags(
        &self,
        container_ids: &[String],
        flag_names: &[String],
    ) -> Result<Vec<ContainerFlags>> {
        if container_ids.is_empty() || flag_names.is_empty() {
            return Ok(vec![]);
        }
        let rows: Vec<PermissionSetFlagsRow> = self
            .rest_client
            .query(
                QueryApi::Data,
                &soql::permission_set_flags(container_ids, flag_names),
            )
            .await
            .context("failed to get system permissions")?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_flags(flag_names))
            .collect())
    }

    async fn fetch_entity_access(&self, container_ids: &[String]) -> Result<Vec<EntityAccessGrant>> {
        if container_ids.is_empty() {
            return Ok(vec![]);
        }
        self.query_to_obj::<SetupEntityAccessRow, _>(
            QueryApi::Data,
            &soql::setup_entity_access(container_ids),
        )
        .await
        .context("failed to get setup entity access")
    }

    async fn fetch_entity_names(
        &self,
        kind: EntityKind,
        ids: &[String],
    ) -> Result<Vec<NamedEntity>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let query = soql::entity_names(kind, ids)
            .ok_or_else(|| anyhow!("{kind} names are read from its catalog, not looked up"))?;
        self.query_to_obj::<NameRow, _>(QueryApi::Data, &query)
            .await
            .with_context(|| format!("failed to get {kind} names"))
    }

    async fn fetch_entity_catalog(&self, kind: EntityKind) -> Result<Vec<NamedEntity>> {
        let (api, query) = match soql::entity_catalog(kind) {
            Some(catalog) => catalog,
            None => bail!("{kind} has no catalog; look names up by id"),
        };
        let res = match kind {
            EntityKind::RecordType => self.query_to_obj::<RecordTypeRow, _>(api, &query).await,
            EntityKind::TabSet => self.query_to_obj::<AppMenuItemRow, _>(api, &query).await,
            _ => self.query_to_obj::<DeveloperNameRow, _>(api, &query).await,
        };
        res.with_context(|| format!("failed to get {kind} catalog"))
    }
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;

    use super::*;

    #[test]
    fn missing_fields_are_reported() {
        let creds = hashmap! {"instance_url".to_owned() => "https://acme.my.salesforce.com".to_owned()};
        let res = SalesforceConnector::new(&ConnectorConfig::default(), &creds);
        assert!(res.is_err());
    }

    #[test]
    fn filled_creds_create_connector() {
        let creds = hashmap! {
            "instance_url".to_owned() => "https://acme.my.salesforce.com".to_owned(),
            "access_token".to_owned() => "token".to_owned(),
        };
        assert!(SalesforceConnector::new(&ConnectorConfig::default(), &creds).is_ok());
    }

    #[tokio::test]
    async fn empty_id_sets_skip_the_network() -> Result<()> {
        // nothing listens here, so any request would fail
        let creds = hashmap! {
            "instance_url".to_owned() => "http://127.0.0.1:9".to_owned(),
            "access_token".to_owned() => "token".to_owned(),
        };
        let sf = SalesforceConnector::new(&ConnectorConfig::default(), &creds)?;

        assert!(sf.fetch_profiles(&[]).await?.is_empty());
        assert!(sf.fetch_object_grants(&[]).await?.is_empty());
        assert!(sf
            .fetch_container_flags(&["0PS1".to_owned()], &[])
            .await?
            .is_empty());
        assert!(sf
            .fetch_entity_names(EntityKind::ApexClass, &[])
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn lookups_and_catalogs_are_not_interchangeable() -> Result<()> {
        let creds = hashmap! {
            "instance_url".to_owned() => "http://127.0.0.1:9".to_owned(),
            "access_token".to_owned() => "token".to_owned(),
        };
        let sf = SalesforceConnector::new(&ConnectorConfig::default(), &creds)?;

        assert!(sf
            .fetch_entity_names(EntityKind::RecordType, &["012000000000001AAA".to_owned()])
            .await
            .is_err());
        assert!(sf.fetch_entity_catalog(EntityKind::ApexClass).await.is_err());
        Ok(())
    }

    #[test]
    fn ids_are_reported_in_18_character_form() -> Result<()> {
        let creds = hashmap! {
            "instance_url".to_owned() => "https://acme.my.salesforce.com".to_owned(),
            "access_token".to_owned() => "token".to_owned(),
        };
        let sf = SalesforceConnector::new(&ConnectorConfig::default(), &creds)?;
        assert_eq!(sf.canonical_id("00e000000000001"), "00e000000000001AAA");
        Ok(())
    }
}
