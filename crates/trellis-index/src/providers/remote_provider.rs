//! Remote HTTP embedding provider.
//!
//! Talks to an OpenAI-compatible `/embeddings` endpoint with a bounded
//! request timeout. Unavailable unless both an endpoint and an API key are
//! configured, so offline deployments skip straight to the next provider.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use trellis_core::config::RemoteProviderConfig;
use trellis_core::errors::IndexError;
use trellis_core::traits::IEmbeddingProvider;

pub const PROVIDER_NAME: &str = "remote-http";

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

/// OpenAI-compatible remote embedding provider.
pub struct RemoteProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimensions: usize,
}

impl RemoteProvider {
    /// Build from config; the API key is read from the configured
    /// environment variable.
    pub fn from_config(
        config: &RemoteProviderConfig,
        dimensions: usize,
    ) -> Result<Self, IndexError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IndexError::Embedding {
                provider: PROVIDER_NAME.to_string(),
                reason: format!("http client: {e}"),
            })?;
        let api_key = std::env::var(&config.api_key_env).ok();
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            dimensions,
        })
    }

    fn request(&self, input: &[&str]) -> Result<Vec<Vec<f32>>, IndexError> {
        let err = |reason: String| IndexError::Embedding {
            provider: PROVIDER_NAME.to_string(),
            reason,
        };
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| err("no API key configured".to_string()))?;

        let response = self
            .client
            .post(format!("{}/embeddings", self.endpoint))
            .bearer_auth(api_key)
            .json(&serde_json::json!({ "model": self.model, "input": input }))
            .send()
            .map_err(|e| err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(err(format!("endpoint returned {status}")));
        }

        let parsed: EmbeddingResponse = response.json().map_err(|e| err(e.to_string()))?;
        if parsed.data.len() != input.len() {
            return Err(err(format!(
                "expected {} embeddings, got {}",
                input.len(),
                parsed.data.len()
            )));
        }
        for row in &parsed.data {
            if row.embedding.len() != self.dimensions {
                return Err(IndexError::DimensionMismatch {
                    index_dims: self.dimensions,
                    query_dims: row.embedding.len(),
                });
            }
        }
        debug!(count = input.len(), model = %self.model, "remote embeddings fetched");
        Ok(parsed.data.into_iter().map(|row| row.embedding).collect())
    }
}

impl IEmbeddingProvider for RemoteProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        let mut vectors = self.request(&[text])?;
        Ok(vectors.remove(0))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, IndexError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        self.request(&refs)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        !self.endpoint.is_empty() && self.api_key.is_some()
    }
}
