use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::dto::StateVector;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Anything that can hand out a fresh batch of aircraft states.
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Never fails: an unreachable source yields an empty batch.
    async fn fetch_states(&self) -> Vec<StateVector>;
}

#[derive(Debug, Default, Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Option<Vec<Value>>,
}

/// Fetches `states/all` from an OpenSky-compatible endpoint.
#[derive(Clone, Debug)]
pub struct OpenSkyFetcher {
    client: reqwest::Client,
    url: String,
}

impl OpenSkyFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        OpenSkyFetcher {
            client,
            url: url.into(),
        }
    }

    async fn try_fetch(&self) -> Result<StatesResponse, FetchError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.json::<StatesResponse>().await?)
    }
}

#[async_trait]
impl StateSource for OpenSkyFetcher {
    async fn fetch_states(&self) -> Vec<StateVector> {
        match self.try_fetch().await {
            Ok(body) => {
                let states = decode_states(body.states.unwrap_or_default());
                debug!("Fetched {} states", states.len());
                states
            }
            Err(err) => {
                error!("Error fetching data: {}", err);
                Vec::new()
            }
        }
    }
}

/// Decodes raw upstream rows, dropping the ones that do not have the state layout.
pub fn decode_states(rows: Vec<Value>) -> Vec<StateVector> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<StateVector>(row) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!("Skipping malformed state row {}: {}", index, err);
                None
            }
        })
        .collect()
}
