//! Rest API interface for Salesforce
//!

use crate::{consts, creds::SalesforceCredentials, entry_types::SObjectDescribe};

use anyhow::{anyhow, Context, Result};
use parity_core::logging::debug;
use reqwest::RequestBuilder;
use serde::{de::DeserializeOwned, Deserialize};

/// One page of a query result.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct QueryPage<T> {
    #[serde(default)]
    total_size: usize,
    done: bool,
    #[serde(default = "Vec::new")]
    records: Vec<T>,
    next_records_url: Option<String>,
}

/// Which query endpoint to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryApi {
    /// The regular data API
    Data,
    /// The tooling API, for metadata like pages and tabs
    Tooling,
}

/// Wrapper struct for http functionality
pub(crate) struct SalesforceRestClient {
    /// The credentials used to authenticate into Salesforce.
    credentials: SalesforceCredentials,
    http_client: reqwest::Client,
    api_version: String,
}

impl SalesforceRestClient {
    pub(crate) fn new(credentials: SalesforceCredentials, api_version: String) -> Result<Self> {
        credentials.validate()?;
        Ok(Self {
            credentials,
            http_client: reqwest::Client::new(),
            api_version,
        })
    }

    /// `<instance>/services/data/v<version>`
    fn base_url(&self) -> String {
        format!(
            "{}/services/data/v{}",
            self.credentials.instance_url.trim_end_matches('/'),
            self.api_version
        )
    }

    fn get_request(&self, url: &str) -> RequestBuilder {
        self.http_client
            .get(url)
            .header(
                consts::AUTH_HEADER,
                format!["Bearer {}", self.credentials.access_token],
            )
            .header(consts::ACCEPT_HEADER, "application/json")
            .header(consts::USER_AGENT_HEADER, consts::USER_AGENT)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_request(url)
            .send()
            .await
            .context("couldn't send request")?
            .error_for_status()?
            .json::<T>()
            .await
            .context("couldn't parse response body")
    }

    /// Run a SOQL query, following `nextRecordsUrl` until the result is
    /// complete.
    pub(crate) async fn query<T: DeserializeOwned>(&self, api: QueryApi, soql: &str) -> Result<Vec<T>> {
        let endpoint = match api {
            QueryApi::Data => "query",
            QueryApi::Tooling => "tooling/query",
        };
        let mut url = format!(
            "{}/{}?q={}",
            self.base_url(),
            endpoint,
            urlencoding::encode(soql)
        );

        let mut records = vec![];
        loop {
            let page: QueryPage<T> = self
                .get_json(&url)
                .await
                .with_context(|| format!("running query: {soql}"))?;
            debug!(
                "fetched {} of {} records",
                records.len() + page.records.len(),
                page.total_size
            );
            records.extend(page.records);

            if page.done {
                break;
            }
            let next = page
                .next_records_url
                .ok_or_else(|| anyhow!["incomplete query result without a nextRecordsUrl"])?;
            url = format!(
                "{}{}",
                self.credentials.instance_url.trim_end_matches('/'),
                next
            );
        }
        Ok(records)
    }

    /// Describe an sObject
    pub(crate) async fn describe(&self, sobject: &str) -> Result<SObjectDescribe> {
        self.get_json(&format!("{}/sobjects/{}/describe", self.base_url(), sobject))
            .await
            .with_context(|| format!("describing {sobject}"))
    }
}
