use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::types::{BatchRequest, BatchResponse};
use crate::error::{ClientError, FetchError};
use crate::reconcile::ContentSource;

const MULTI_DIFF_PATH: &str = "/api/multi-diff";
const FILE_PATH: &str = "/api/file";

/// `GET /api/file` response body.
#[derive(Deserialize)]
struct FileContentResponse {
    #[serde(default)]
    content: String,
}

/// HTTP client for the diff server.
pub struct DiffClient {
    base_url: String,
    client: reqwest::Client,
}

impl DiffClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().map_err(ClientError::Setup)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the whole batch. Any failure here is fatal to the run.
    pub async fn multi_diff(&self, request: &BatchRequest) -> Result<BatchResponse, ClientError> {
        let url = self.url(MULTI_DIFF_PATH);
        debug!(pairs = request.file_pairs.len(), %url, "sending batch");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let batch: BatchResponse = response
            .json()
            .await
            .map_err(|source| ClientError::Decode {
                url: url.clone(),
                source,
            })?;

        debug!(
            results = batch.results.len(),
            errors = batch.errors.len(),
            "batch response received"
        );
        Ok(batch)
    }

    /// Fetch one file's content. Only HTTP 200 counts as success.
    pub async fn file_content(&self, path: &str) -> Result<String, ClientError> {
        let url = self.url(FILE_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[("path", path)])
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: FileContentResponse = response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })?;
        Ok(body.content)
    }
}

#[async_trait]
impl ContentSource for DiffClient {
    async fn fetch_content(&self, path: &str) -> Result<String, FetchError> {
        self.file_content(path).await
    }
}
