// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request and response shapes for the backend REST contract
//!
//! Field names and optionality follow the backend verbatim. Conversions
//! into store-side types live next to the response they come from.

use flowml_core::{DatasetInfo, ModelKind, ModelReport, Scaler, SplitSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Default fraction of rows held out by the split stage.
pub const DEFAULT_TEST_FRACTION: f64 = 0.3;

/// Default random seed forwarded to the backend.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of rows in a dataset preview.
pub const DEFAULT_PREVIEW_ROWS: u32 = 10;

/// Upload size limit enforced client-side, matching the backend's.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// File extensions the backend accepts.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub dataset_id: String,
    pub info: DatasetInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessRequest {
    pub dataset_id: String,
    pub scaler_type: Scaler,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_to_scale: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessResponse {
    pub success: bool,
    pub message: String,
    pub dataset_id: String,
    pub scaler_applied: String,
    #[serde(default)]
    pub columns_scaled: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub dataset_id: String,
    /// Fraction of rows held out for testing, 0.1..=0.5 on the backend.
    pub test_size: f64,
    pub target_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_state: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitResponse {
    pub success: bool,
    pub message: String,
    pub dataset_id: String,
    /// Row counts, not fractions.
    pub train_size: u64,
    pub test_size: u64,
    pub target_column: String,
}

impl SplitResponse {
    pub fn into_summary(self) -> SplitSummary {
        SplitSummary {
            train_rows: self.train_size,
            test_rows: self.test_size,
            target_column: self.target_column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRequest {
    pub dataset_id: String,
    pub model_type: ModelKind,
    pub target_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperparameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainResponse {
    pub success: bool,
    pub message: String,
    pub model_id: String,
    pub model_type: ModelKind,
    pub accuracy: f64,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub recall: Option<f64>,
    #[serde(default)]
    pub f1_score: Option<f64>,
    #[serde(default)]
    pub confusion_matrix: Option<Vec<Vec<u64>>>,
    #[serde(default)]
    pub class_labels: Option<Vec<String>>,
    #[serde(default)]
    pub r2_score: Option<f64>,
    #[serde(default)]
    pub rmse: Option<f64>,
    #[serde(default)]
    pub mae: Option<f64>,
    #[serde(default)]
    pub feature_importance: Option<BTreeMap<String, f64>>,
}

impl TrainResponse {
    pub fn into_report(self) -> ModelReport {
        ModelReport {
            model_id: self.model_id,
            model_type: self.model_type,
            accuracy: self.accuracy,
            precision: self.precision,
            recall: self.recall,
            f1_score: self.f1_score,
            confusion_matrix: self.confusion_matrix,
            class_labels: self.class_labels,
            r2_score: self.r2_score,
            rmse: self.rmse,
            mae: self.mae,
            feature_importance: self.feature_importance,
        }
    }
}

/// Advisory score for one candidate target column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecommendation {
    pub column: String,
    pub score: u32,
    pub unique_values: u64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecommendations {
    #[serde(default)]
    pub recommendations: Vec<TargetRecommendation>,
    pub total_columns: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTargetRequest {
    pub dataset_id: String,
    pub target_column: String,
}

/// Advisory verdict on a chosen target column. `is_valid` false means the
/// column cannot be a target at all (single unique value); warnings are
/// softer hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetValidation {
    pub is_valid: bool,
    pub column_name: String,
    pub unique_values: u64,
    pub data_type: String,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
