//! PokeAPI client backed by the in-memory response cache
//!
//! Every request goes through [`PokeApiClient::fetch`], which answers from the
//! cache when it can and otherwise stores the raw response body under the request
//! URL before decoding it.

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::{LocationArea, LocationAreaPage};
use crate::cache::Cache;

/// Base URL for the PokeAPI
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when fetching from the PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("failed to fetch data, status code: {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for fetching location data from the PokeAPI
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    cache: Cache,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for the public PokeAPI using the given cache
    pub fn new(cache: Cache) -> Self {
        Self::with_base_url(cache, POKEAPI_BASE_URL)
    }

    /// Creates a client against a custom base URL (mirrors or tests)
    pub fn with_base_url(cache: Cache, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            cache,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the location-area listing page starting at `offset`
    pub fn location_areas_url(&self, offset: u32, limit: u32) -> String {
        format!(
            "{}/location-area/?offset={}&limit={}",
            self.base_url, offset, limit
        )
    }

    /// URL of a single location area by name or id
    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    /// Fetches `url` and decodes the JSON body into `T`
    ///
    /// # Returns
    /// * `Ok(T)` - Decoded from the cached body on a hit, or from a fresh response
    /// * `Err(ApiError)` - If the request fails, the status is not 2xx, or decoding fails
    ///
    /// # Behavior
    /// - A cache hit never touches the network
    /// - A successful response body is cached before it is decoded, so a body that
    ///   fails to decode is still cached
    /// - Error statuses are never cached
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        if let Some(cached) = self.cache.get(url) {
            debug!(url, "Using cached response");
            return Ok(serde_json::from_slice(&cached)?);
        }

        debug!(url, "Fetching from network");
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        if status > 299 {
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        self.cache.add(url, body.to_vec());

        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches one page of the location-area listing
    pub async fn fetch_location_areas(&self, url: &str) -> Result<LocationAreaPage, ApiError> {
        self.fetch(url).await
    }

    /// Fetches a single location area with its Pokemon encounters
    pub async fn fetch_location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        self.fetch(&self.location_area_url(name)).await
    }
}
