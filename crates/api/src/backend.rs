// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend trait definition and error taxonomy

use crate::wire::{
    PreprocessRequest, PreprocessResponse, SetTargetRequest, SplitRequest, SplitResponse,
    TargetRecommendations, TargetValidation, TrainRequest, TrainResponse, UploadResponse,
};
use async_trait::async_trait;
use flowml_core::{DatasetInfo, DatasetPreview, ModelReport};
use thiserror::Error;

/// Errors from backend calls.
///
/// `Transport` covers connection and timeout failures, `Backend` carries a
/// non-2xx response with the backend's own detail message, `Decode` means
/// the body did not match the contract. Action handlers collapse all three
/// into the stage's error status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend error ({status}): {detail}")]
    Backend { status: u16, detail: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The FlowML backend REST contract.
#[async_trait]
pub trait MlBackend: Clone + Send + Sync + 'static {
    /// Upload a dataset file; the backend assigns the dataset id.
    async fn upload_dataset(&self, filename: &str, bytes: Vec<u8>)
        -> Result<UploadResponse, ApiError>;

    /// Fetch metadata for an uploaded dataset.
    async fn dataset_info(&self, dataset_id: &str) -> Result<DatasetInfo, ApiError>;

    /// Fetch the first `num_rows` rows plus per-column metadata.
    async fn dataset_preview(
        &self,
        dataset_id: &str,
        num_rows: u32,
    ) -> Result<DatasetPreview, ApiError>;

    /// Apply feature scaling in place on the backend.
    async fn preprocess(&self, req: &PreprocessRequest) -> Result<PreprocessResponse, ApiError>;

    /// Materialize a train/test split on the backend.
    async fn train_test_split(&self, req: &SplitRequest) -> Result<SplitResponse, ApiError>;

    /// Train a model and return its metrics.
    async fn train_model(&self, req: &TrainRequest) -> Result<TrainResponse, ApiError>;

    /// Fetch the report of a previously trained model.
    async fn model_report(&self, model_id: &str) -> Result<ModelReport, ApiError>;

    /// Advisory target-column scores for a dataset.
    async fn target_recommendations(
        &self,
        dataset_id: &str,
    ) -> Result<TargetRecommendations, ApiError>;

    /// Record the chosen target column and return the advisory verdict.
    async fn set_target(&self, req: &SetTargetRequest) -> Result<TargetValidation, ApiError>;
}
