// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline store
//!
//! Single source of truth for dataset identity, stage statuses, and model
//! results. Deliberately a dumb container: every setter is an unconditional
//! assignment and nothing here validates transitions. Gating lives in
//! [`crate::gates`] and the action protocol in `flowml-engine`.
//!
//! The generation counter is bumped only by [`PipelineStore::reset`]. An
//! action handler captures the generation before awaiting a backend call
//! and discards the settlement if it no longer matches, which closes the
//! stale-response-after-reset race.

use crate::dataset::{DatasetInfo, DatasetPreview};
use crate::model::{ModelReport, SplitSummary};
use crate::stage::{Stage, StageStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStore {
    dataset_id: Option<String>,
    dataset_info: Option<DatasetInfo>,
    dataset_preview: Option<DatasetPreview>,
    target_column: Option<String>,
    upload_status: StageStatus,
    preprocess_status: StageStatus,
    split_status: StageStatus,
    model_status: StageStatus,
    split_summary: Option<SplitSummary>,
    model_results: Option<ModelReport>,
    generation: u64,
}

impl PipelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Read accessors

    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    pub fn dataset_info(&self) -> Option<&DatasetInfo> {
        self.dataset_info.as_ref()
    }

    pub fn dataset_preview(&self) -> Option<&DatasetPreview> {
        self.dataset_preview.as_ref()
    }

    pub fn target_column(&self) -> Option<&str> {
        self.target_column.as_deref()
    }

    pub fn upload_status(&self) -> StageStatus {
        self.upload_status
    }

    pub fn preprocess_status(&self) -> StageStatus {
        self.preprocess_status
    }

    pub fn split_status(&self) -> StageStatus {
        self.split_status
    }

    pub fn model_status(&self) -> StageStatus {
        self.model_status
    }

    /// Status of any stage. Results has no status of its own and mirrors
    /// the train stage.
    pub fn stage_status(&self, stage: Stage) -> StageStatus {
        match stage {
            Stage::Upload => self.upload_status,
            Stage::Preprocess => self.preprocess_status,
            Stage::Split => self.split_status,
            Stage::Train | Stage::Results => self.model_status,
        }
    }

    pub fn split_summary(&self) -> Option<&SplitSummary> {
        self.split_summary.as_ref()
    }

    pub fn model_results(&self) -> Option<&ModelReport> {
        self.model_results.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // Setters: unconditional assignment, no validation.

    pub fn set_dataset_id(&mut self, id: Option<String>) {
        self.dataset_id = id;
    }

    pub fn set_dataset_info(&mut self, info: Option<DatasetInfo>) {
        self.dataset_info = info;
    }

    pub fn set_dataset_preview(&mut self, preview: Option<DatasetPreview>) {
        self.dataset_preview = preview;
    }

    pub fn set_target_column(&mut self, column: Option<String>) {
        self.target_column = column;
    }

    pub fn set_upload_status(&mut self, status: StageStatus) {
        self.upload_status = status;
    }

    pub fn set_preprocess_status(&mut self, status: StageStatus) {
        self.preprocess_status = status;
    }

    pub fn set_split_status(&mut self, status: StageStatus) {
        self.split_status = status;
    }

    pub fn set_model_status(&mut self, status: StageStatus) {
        self.model_status = status;
    }

    pub fn set_split_summary(&mut self, summary: Option<SplitSummary>) {
        self.split_summary = summary;
    }

    pub fn set_model_results(&mut self, results: Option<ModelReport>) {
        self.model_results = results;
    }

    /// Restore every dataset, status, and result field to its initial
    /// value and bump the generation counter. Settlements captured under
    /// an older generation must be discarded by their handlers.
    pub fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = PipelineStore {
            generation,
            ..PipelineStore::default()
        };
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
