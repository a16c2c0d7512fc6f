//! Google Books volumes search client

use super::{search_expression, MetadataLookup};
use crate::config::{LookupConfig, MAX_CANDIDATES};
use crate::error::LookupError;
use crate::types::{BookQuery, CandidateRecord, VolumesResponse};
use async_trait::async_trait;

/// HTTP client for the volumes search endpoint
pub struct GoogleBooksClient {
    client: reqwest::Client,
    config: LookupConfig,
}

impl GoogleBooksClient {
    /// Build a client with the configured timeout and user agent
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LookupError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MetadataLookup for GoogleBooksClient {
    async fn search(&self, query: &BookQuery) -> Result<Vec<CandidateRecord>, LookupError> {
        let expression = search_expression(query);
        let max_results = MAX_CANDIDATES.to_string();

        let mut params = vec![("q", expression.as_str()), ("maxResults", max_results.as_str())];
        if let Some(key) = &self.config.api_key {
            params.push(("key", key.as_str()));
        }

        tracing::debug!("GET {} q={}", self.config.base_url, expression);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: VolumesResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Parse(e.to_string()))?;

        let mut items = parsed.items;
        items.truncate(MAX_CANDIDATES);

        tracing::debug!("Lookup for '{}' returned {} candidates", query, items.len());
        Ok(items)
    }
}
