use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Credentials for the Salesforce REST API.
///
/// The access token is obtained outside of parity (for example with the
/// Salesforce CLI) and pasted into connectors.yaml.
#[derive(Deserialize, Debug, Default, Clone)]
pub(crate) struct SalesforceCredentials {
    /// Base URL of the org, like `https://acme.my.salesforce.com`
    pub(crate) instance_url: String,
    pub(crate) access_token: String,
}

impl SalesforceCredentials {
    /// Perform simple field validation to catch bad input.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.instance_url.is_empty() || self.access_token.is_empty() {
            return Err(anyhow!(
                "Credentials are missing. Please make sure your connectors.yaml file is correct."
            ));
        }
        if !(self.instance_url.starts_with("https://") || self.instance_url.starts_with("http://"))
        {
            return Err(anyhow!(
                "instance_url must be an http(s) URL; got {}",
                self.instance_url
            ));
        }
        Ok(())
    }
}
