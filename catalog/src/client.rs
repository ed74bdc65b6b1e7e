use crate::error::{CatalogError, CatalogResult};
use crate::records::{CreatureRecord, MoveRecord};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Read-through cached catalog client.
///
/// Every successful response is cached by endpoint URL, so repeated lookups
/// (move details shared across rounds, league re-draws) hit the network at
/// most once per endpoint for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<Mutex<HashMap<String, Arc<serde_json::Value>>>>,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Absolute URL for a creature record.
    pub fn creature_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.base_url, id)
    }

    /// Fetch a creature record by catalog id.
    pub async fn creature(&self, id: u32) -> CatalogResult<CreatureRecord> {
        self.fetch(&self.creature_url(id)).await
    }

    /// Fetch a move record by the absolute URL a creature record refers to.
    pub async fn move_by_url(&self, url: &str) -> CatalogResult<MoveRecord> {
        self.fetch(url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> CatalogResult<T> {
        let value = match self.cached(endpoint) {
            Some(value) => value,
            None => {
                let fetched = self.fetch_remote(endpoint).await?;
                self.cache
                    .lock()
                    .expect("catalog cache lock poisoned")
                    .insert(endpoint.to_string(), Arc::clone(&fetched));
                fetched
            }
        };

        serde_json::from_value((*value).clone()).map_err(|err| CatalogError::Decode {
            endpoint: endpoint.to_string(),
            detail: err.to_string(),
        })
    }

    fn cached(&self, endpoint: &str) -> Option<Arc<serde_json::Value>> {
        self.cache
            .lock()
            .expect("catalog cache lock poisoned")
            .get(endpoint)
            .cloned()
    }

    async fn fetch_remote(&self, endpoint: &str) -> CatalogResult<Arc<serde_json::Value>> {
        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|err| CatalogError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|err| CatalogError::Decode {
                endpoint: endpoint.to_string(),
                detail: err.to_string(),
            })?;

        Ok(Arc::new(value))
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}
