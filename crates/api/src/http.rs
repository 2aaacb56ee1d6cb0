// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed implementation of [`MlBackend`]

use crate::backend::{ApiError, MlBackend};
use crate::wire::{
    PreprocessRequest, PreprocessResponse, SetTargetRequest, SplitRequest, SplitResponse,
    TargetRecommendations, TargetValidation, TrainRequest, TrainResponse, UploadResponse,
    API_PREFIX,
};
use async_trait::async_trait;
use flowml_core::{DatasetInfo, DatasetPreview, ModelReport};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP client for the FlowML backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client against `base_url` (scheme and host, no path
    /// prefix). One timeout covers every request, uploads included.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "backend GET");
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "backend POST");
        let response = self.client.post(&url).json(body).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl MlBackend for HttpBackend {
    async fn upload_dataset(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let url = self.endpoint("/upload");
        tracing::debug!(%url, size = bytes.len(), "backend POST (multipart)");
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let response = self.client.post(&url).multipart(form).send().await?;
        read_json(response).await
    }

    async fn dataset_info(&self, dataset_id: &str) -> Result<DatasetInfo, ApiError> {
        self.get_json(&format!("/dataset/{dataset_id}/info")).await
    }

    async fn dataset_preview(
        &self,
        dataset_id: &str,
        num_rows: u32,
    ) -> Result<DatasetPreview, ApiError> {
        let url = self.endpoint(&format!("/dataset/{dataset_id}/preview"));
        tracing::debug!(%url, num_rows, "backend GET");
        let response = self
            .client
            .get(&url)
            .query(&[("num_rows", num_rows)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn preprocess(&self, req: &PreprocessRequest) -> Result<PreprocessResponse, ApiError> {
        self.post_json("/preprocess", req).await
    }

    async fn train_test_split(&self, req: &SplitRequest) -> Result<SplitResponse, ApiError> {
        self.post_json("/train-test-split", req).await
    }

    async fn train_model(&self, req: &TrainRequest) -> Result<TrainResponse, ApiError> {
        self.post_json("/train-model", req).await
    }

    async fn model_report(&self, model_id: &str) -> Result<ModelReport, ApiError> {
        self.get_json(&format!("/model/{model_id}")).await
    }

    async fn target_recommendations(
        &self,
        dataset_id: &str,
    ) -> Result<TargetRecommendations, ApiError> {
        self.get_json(&format!("/dataset/{dataset_id}/target-recommendations"))
            .await
    }

    async fn set_target(&self, req: &SetTargetRequest) -> Result<TargetValidation, ApiError> {
        self.post_json("/set-target", req).await
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{base_url}{API_PREFIX}{path}")
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(backend_error(status.as_u16(), &body));
    }
    Ok(response.json::<T>().await?)
}

/// Map a non-2xx response to [`ApiError::Backend`], preferring the
/// backend's own `detail` message over the raw body.
fn backend_error(status: u16, body: &str) -> ApiError {
    let detail = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        },
        Err(_) => None,
    };
    let detail = detail.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("HTTP {status}")
        } else {
            snippet(trimmed)
        }
    });
    ApiError::Backend { status, detail }
}

/// Cap raw bodies so a stray HTML error page does not flood the log.
fn snippet(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    if body.chars().count() <= MAX_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
