// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage action handlers
//!
//! Every stage action follows one protocol: admission under the store
//! lock (in-flight no-op, terminal-success no-op, gate check), set the
//! in-flight status and capture the generation token, await exactly one
//! backend call, then settle under the lock again. A settlement whose
//! token no longer matches the store generation (a reset happened while
//! the call was in flight) is discarded without touching the store.
//!
//! The lock is never held across an await point.

use crate::error::EngineError;
use crate::outcome::{ActionOutcome, SkipReason};
use flowml_api::wire::{ALLOWED_EXTENSIONS, DEFAULT_SEED, DEFAULT_TEST_FRACTION, MAX_UPLOAD_BYTES};
use flowml_api::{
    MlBackend, PreprocessRequest, SetTargetRequest, SplitRequest, TargetRecommendations,
    TargetValidation, TrainRequest,
};
use flowml_core::{
    gates, DatasetPreview, ModelKind, ModelReport, PipelineStore, Scaler, StageStatus,
};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Options for the preprocess action.
#[derive(Debug, Clone, Default)]
pub struct PreprocessOptions {
    pub scaler: Scaler,
    /// Restrict scaling to these columns; `None` scales all numeric ones.
    pub columns: Option<Vec<String>>,
}

/// Options for the split action.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub test_fraction: f64,
    pub seed: Option<u64>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: Some(DEFAULT_SEED),
        }
    }
}

/// Options for the train action.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub model: ModelKind,
    pub hyperparameters: Option<serde_json::Value>,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            model: ModelKind::LogisticRegression,
            hyperparameters: None,
        }
    }
}

/// Drives the stage actions against a shared store and a backend.
#[derive(Clone)]
pub struct PipelineRunner<B: MlBackend> {
    store: Arc<Mutex<PipelineStore>>,
    api: B,
}

impl<B: MlBackend> PipelineRunner<B> {
    pub fn new(store: Arc<Mutex<PipelineStore>>, api: B) -> Self {
        Self { store, api }
    }

    /// Handle to the shared store.
    pub fn store(&self) -> Arc<Mutex<PipelineStore>> {
        Arc::clone(&self.store)
    }

    /// Owned copy of the current store state.
    pub fn snapshot(&self) -> PipelineStore {
        self.lock_store().clone()
    }

    /// Discard the pipeline. Settlements of calls still in flight will
    /// see a newer generation and be dropped.
    pub fn reset(&self) {
        let mut store = self.lock_store();
        store.reset();
        tracing::info!(generation = store.generation(), "pipeline reset");
    }

    fn lock_store(&self) -> MutexGuard<'_, PipelineStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Upload a dataset file. First stage, so there is no gate; the file
    /// is validated client-side before any backend call.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> ActionOutcome {
        let generation = {
            let mut store = self.lock_store();
            if let Some(reason) = admission(store.upload_status(), true) {
                tracing::warn!(stage = "upload", ?reason, "skipped");
                return ActionOutcome::Skipped { reason };
            }
            if let Err(message) = validate_upload(filename, bytes.len() as u64) {
                store.set_upload_status(StageStatus::Error);
                tracing::error!(stage = "upload", %message, "rejected client-side");
                return ActionOutcome::Failed { message };
            }
            store.set_upload_status(StageStatus::InFlight);
            store.generation()
        };

        let start = Instant::now();
        let result = self.api.upload_dataset(filename, bytes).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let mut store = self.lock_store();
        if store.generation() != generation {
            tracing::warn!(stage = "upload", elapsed_ms, "stale settlement discarded");
            return ActionOutcome::Superseded;
        }
        match result {
            Ok(response) => {
                store.set_dataset_id(Some(response.dataset_id));
                store.set_dataset_info(Some(response.info));
                store.set_upload_status(StageStatus::Success);
                tracing::info!(stage = "upload", elapsed_ms, "completed");
                ActionOutcome::Completed
            }
            Err(err) => {
                store.set_upload_status(StageStatus::Error);
                tracing::error!(stage = "upload", elapsed_ms, error = %err, "failed");
                ActionOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Apply feature scaling. Requires a successfully uploaded dataset.
    pub async fn preprocess(&self, options: PreprocessOptions) -> ActionOutcome {
        let (generation, request) = {
            let mut store = self.lock_store();
            let gate_open = gates::can_preprocess(&store);
            if let Some(reason) = admission(store.preprocess_status(), gate_open) {
                tracing::warn!(stage = "preprocess", ?reason, "skipped");
                return ActionOutcome::Skipped { reason };
            }
            let Some(dataset_id) = store.dataset_id().map(str::to_string) else {
                return ActionOutcome::Skipped {
                    reason: SkipReason::GateClosed,
                };
            };
            store.set_preprocess_status(StageStatus::InFlight);
            let request = PreprocessRequest {
                dataset_id,
                scaler_type: options.scaler,
                columns_to_scale: options.columns,
                target_column: store.target_column().map(str::to_string),
            };
            (store.generation(), request)
        };

        let start = Instant::now();
        let result = self.api.preprocess(&request).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let mut store = self.lock_store();
        if store.generation() != generation {
            tracing::warn!(stage = "preprocess", elapsed_ms, "stale settlement discarded");
            return ActionOutcome::Superseded;
        }
        match result {
            Ok(response) => {
                store.set_preprocess_status(StageStatus::Success);
                tracing::info!(
                    stage = "preprocess",
                    elapsed_ms,
                    scaler = %response.scaler_applied,
                    "completed"
                );
                ActionOutcome::Completed
            }
            Err(err) => {
                store.set_preprocess_status(StageStatus::Error);
                tracing::error!(stage = "preprocess", elapsed_ms, error = %err, "failed");
                ActionOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Materialize a train/test split. Requires preprocessing and a
    /// chosen target column.
    pub async fn split(&self, options: SplitOptions) -> ActionOutcome {
        let (generation, request) = {
            let mut store = self.lock_store();
            let gate_open = gates::can_split(&store);
            if let Some(reason) = admission(store.split_status(), gate_open) {
                tracing::warn!(stage = "split", ?reason, "skipped");
                return ActionOutcome::Skipped { reason };
            }
            let (Some(dataset_id), Some(target_column)) = (
                store.dataset_id().map(str::to_string),
                store.target_column().map(str::to_string),
            ) else {
                return ActionOutcome::Skipped {
                    reason: SkipReason::GateClosed,
                };
            };
            store.set_split_status(StageStatus::InFlight);
            let request = SplitRequest {
                dataset_id,
                test_size: options.test_fraction,
                target_column,
                random_state: options.seed,
            };
            (store.generation(), request)
        };

        let start = Instant::now();
        let result = self.api.train_test_split(&request).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let mut store = self.lock_store();
        if store.generation() != generation {
            tracing::warn!(stage = "split", elapsed_ms, "stale settlement discarded");
            return ActionOutcome::Superseded;
        }
        match result {
            Ok(response) => {
                let summary = response.into_summary();
                tracing::info!(
                    stage = "split",
                    elapsed_ms,
                    train_rows = summary.train_rows,
                    test_rows = summary.test_rows,
                    "completed"
                );
                store.set_split_summary(Some(summary));
                store.set_split_status(StageStatus::Success);
                ActionOutcome::Completed
            }
            Err(err) => {
                store.set_split_status(StageStatus::Error);
                tracing::error!(stage = "split", elapsed_ms, error = %err, "failed");
                ActionOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Train a model. Requires a dataset and target column; when the
    /// split stage has not succeeded the backend split runs first with
    /// default parameters, so training never depends on backend-side
    /// magic.
    pub async fn train(&self, options: TrainOptions) -> ActionOutcome {
        let (generation, dataset_id, target_column, needs_split) = {
            let mut store = self.lock_store();
            let gate_open = gates::can_train(&store);
            if let Some(reason) = admission(store.model_status(), gate_open) {
                tracing::warn!(stage = "train", ?reason, "skipped");
                return ActionOutcome::Skipped { reason };
            }
            let (Some(dataset_id), Some(target_column)) = (
                store.dataset_id().map(str::to_string),
                store.target_column().map(str::to_string),
            ) else {
                return ActionOutcome::Skipped {
                    reason: SkipReason::GateClosed,
                };
            };
            store.set_model_status(StageStatus::InFlight);
            let needs_split = !store.split_status().is_success();
            (store.generation(), dataset_id, target_column, needs_split)
        };

        if needs_split {
            tracing::info!(stage = "train", "no explicit split; splitting with defaults first");
            let request = SplitRequest {
                dataset_id: dataset_id.clone(),
                test_size: DEFAULT_TEST_FRACTION,
                target_column: target_column.clone(),
                random_state: Some(DEFAULT_SEED),
            };
            match self.api.train_test_split(&request).await {
                Ok(response) => {
                    let mut store = self.lock_store();
                    if store.generation() != generation {
                        tracing::warn!(stage = "train", "stale settlement discarded");
                        return ActionOutcome::Superseded;
                    }
                    store.set_split_summary(Some(response.into_summary()));
                    store.set_split_status(StageStatus::Success);
                }
                Err(err) => {
                    let mut store = self.lock_store();
                    if store.generation() != generation {
                        tracing::warn!(stage = "train", "stale settlement discarded");
                        return ActionOutcome::Superseded;
                    }
                    // The user never asked for a split; only the train
                    // stage reports the failure.
                    store.set_model_status(StageStatus::Error);
                    tracing::error!(stage = "train", error = %err, "implicit split failed");
                    return ActionOutcome::Failed {
                        message: err.to_string(),
                    };
                }
            }
        }

        let request = TrainRequest {
            dataset_id,
            model_type: options.model,
            target_column,
            hyperparameters: options.hyperparameters,
        };
        let start = Instant::now();
        let result = self.api.train_model(&request).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let mut store = self.lock_store();
        if store.generation() != generation {
            tracing::warn!(stage = "train", elapsed_ms, "stale settlement discarded");
            return ActionOutcome::Superseded;
        }
        match result {
            Ok(response) => {
                let report = response.into_report();
                tracing::info!(
                    stage = "train",
                    elapsed_ms,
                    model_id = %report.model_id,
                    accuracy = report.accuracy,
                    "completed"
                );
                store.set_model_results(Some(report));
                store.set_model_status(StageStatus::Success);
                ActionOutcome::Completed
            }
            Err(err) => {
                store.set_model_status(StageStatus::Error);
                tracing::error!(stage = "train", elapsed_ms, error = %err, "failed");
                ActionOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Validate a target column with the backend and record it when the
    /// backend accepts it as usable. Warnings come back to the caller.
    pub async fn choose_target(&self, column: &str) -> Result<TargetValidation, EngineError> {
        let (dataset_id, generation) = {
            let store = self.lock_store();
            let dataset_id = store
                .dataset_id()
                .map(str::to_string)
                .ok_or(EngineError::NoDataset)?;
            (dataset_id, store.generation())
        };
        let request = SetTargetRequest {
            dataset_id,
            target_column: column.to_string(),
        };
        let validation = self.api.set_target(&request).await?;

        let mut store = self.lock_store();
        if store.generation() == generation && validation.is_valid {
            store.set_target_column(Some(validation.column_name.clone()));
        }
        Ok(validation)
    }

    /// Advisory target-column scores for the uploaded dataset.
    pub async fn target_recommendations(&self) -> Result<TargetRecommendations, EngineError> {
        let dataset_id = self
            .lock_store()
            .dataset_id()
            .map(str::to_string)
            .ok_or(EngineError::NoDataset)?;
        Ok(self.api.target_recommendations(&dataset_id).await?)
    }

    /// Fetch a dataset preview and cache it on the store.
    pub async fn load_preview(&self, num_rows: u32) -> Result<DatasetPreview, EngineError> {
        let (dataset_id, generation) = {
            let store = self.lock_store();
            let dataset_id = store
                .dataset_id()
                .map(str::to_string)
                .ok_or(EngineError::NoDataset)?;
            (dataset_id, store.generation())
        };
        let preview = self.api.dataset_preview(&dataset_id, num_rows).await?;

        let mut store = self.lock_store();
        if store.generation() == generation {
            store.set_dataset_preview(Some(preview.clone()));
        }
        Ok(preview)
    }

    /// Re-fetch the trained model's report from the backend.
    pub async fn refresh_results(&self) -> Result<ModelReport, EngineError> {
        let (model_id, generation) = {
            let store = self.lock_store();
            let model_id = store
                .model_results()
                .map(|r| r.model_id.clone())
                .ok_or(EngineError::NoModel)?;
            (model_id, store.generation())
        };
        let report = self.api.model_report(&model_id).await?;

        let mut store = self.lock_store();
        if store.generation() == generation {
            store.set_model_results(Some(report.clone()));
        }
        Ok(report)
    }
}

/// Skip-or-proceed decision shared by every stage action.
fn admission(status: StageStatus, gate_open: bool) -> Option<SkipReason> {
    if status.is_in_flight() {
        Some(SkipReason::AlreadyInFlight)
    } else if status.is_success() {
        Some(SkipReason::AlreadyDone)
    } else if !gate_open {
        Some(SkipReason::GateClosed)
    } else {
        None
    }
}

/// Client-side file validation, mirroring the backend's limits.
fn validate_upload(filename: &str, size: u64) -> Result<(), String> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let allowed = extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext));
    if !allowed {
        return Err(format!(
            "unsupported file type (expected one of: {})",
            ALLOWED_EXTENSIONS.join(", ")
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(format!("file too large ({MAX_UPLOAD_BYTES} byte limit)"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
