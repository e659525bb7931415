use anyhow::Context;
use serde::de::DeserializeOwned;

use super::error::TransportError;
use super::graphql::{GraphqlResponse, decode_response};

/// Executes a GraphQL query with bound variables and decodes the `data` member.
pub trait QueryClient {
    fn execute<T>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> impl Future<Output = Result<T, TransportError>>
    where
        T: DeserializeOwned;
}

pub struct OctocrabClient {
    octocrab: octocrab::Octocrab,
}

impl OctocrabClient {
    pub fn new(host: &str, token: String) -> anyhow::Result<Self> {
        Self::with_base_uri(&api_base_url(host), token)
    }

    pub fn with_base_uri(base_uri: &str, token: String) -> anyhow::Result<Self> {
        let octocrab = octocrab::Octocrab::builder()
            .base_uri(base_uri.to_string())
            .context("failed to set base URI")?
            .personal_token(token)
            .build()
            .context("failed to build GitHub client")?;
        Ok(Self { octocrab })
    }
}

impl QueryClient for OctocrabClient {
    async fn execute<T>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        let payload = serde_json::json!({ "query": query, "variables": variables });

        let resp = self
            .octocrab
            .graphql::<GraphqlResponse<serde_json::Value>>(&payload)
            .await
            .map_err(|err| TransportError::Http {
                message: err.to_string(),
            })?;

        decode_response(resp)
    }
}

fn api_base_url(host: &str) -> String {
    if host.eq_ignore_ascii_case("github.com") {
        "https://api.github.com".to_string()
    } else {
        format!("https://{host}/api")
    }
}
