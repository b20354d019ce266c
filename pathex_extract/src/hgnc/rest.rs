//! HGNC REST service client.

use pathex_config::HgncConfig;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::HgncLookup;
use crate::error::LookupError;

#[derive(Debug, Deserialize)]
struct FetchResponse {
    response: FetchBody,
}

#[derive(Debug, Deserialize)]
struct FetchBody {
    #[serde(default)]
    docs: Vec<FetchDoc>,
}

#[derive(Debug, Deserialize)]
struct FetchDoc {
    symbol: Option<String>,
}

/// Extract the approved symbol from a `fetch/hgnc_id` response body.
pub fn parse_fetch_response(hgnc_id: u32, body: &str) -> Result<String, LookupError> {
    let parsed: FetchResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;
    parsed
        .response
        .docs
        .into_iter()
        .next()
        .and_then(|doc| doc.symbol)
        .ok_or(LookupError::NotFound(hgnc_id))
}

/// Blocking client for `GET {base_url}/fetch/hgnc_id/{id}`.
pub struct HgncRestClient {
    client: Client,
    base_url: String,
}

impl HgncRestClient {
    pub fn new(config: &HgncConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LookupError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn url(&self, hgnc_id: u32) -> String {
        format!("{}/fetch/hgnc_id/{hgnc_id}", self.base_url)
    }
}

impl HgncLookup for HgncRestClient {
    fn symbol(&self, hgnc_id: u32) -> Result<String, LookupError> {
        let url = self.url(hgnc_id);
        debug!("Fetching HGNC symbol from {url}");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| LookupError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http(format!("{url} returned {status}")));
        }

        let body = response
            .text()
            .map_err(|e| LookupError::Http(e.to_string()))?;
        parse_fetch_response(hgnc_id, &body)
    }
}
