//! Fake backend implementation for testing
//!
//! Records every call, serves scripted responses derived from a
//! configurable dataset shape, and can fail or hold individual endpoints
//! so tests can drive error paths and in-flight interleavings.

use crate::backend::{ApiError, MlBackend};
use crate::wire::{
    PreprocessRequest, PreprocessResponse, SetTargetRequest, SplitRequest, SplitResponse,
    TargetRecommendation, TargetRecommendations, TargetValidation, TrainRequest, TrainResponse,
    UploadResponse,
};
use async_trait::async_trait;
use flowml_core::{DatasetInfo, DatasetPreview, ModelKind, ModelReport, Scaler};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Recorded call to a backend method
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Upload {
        filename: String,
        size: usize,
    },
    DatasetInfo {
        dataset_id: String,
    },
    Preview {
        dataset_id: String,
        num_rows: u32,
    },
    Preprocess {
        dataset_id: String,
        scaler: Scaler,
    },
    Split {
        dataset_id: String,
        test_size: f64,
        target_column: String,
    },
    Train {
        dataset_id: String,
        model_type: ModelKind,
        target_column: String,
    },
    ModelReport {
        model_id: String,
    },
    Recommendations {
        dataset_id: String,
    },
    SetTarget {
        dataset_id: String,
        target_column: String,
    },
}

/// Shared state for the fake backend
struct FakeState {
    calls: Vec<ApiCall>,
    dataset_id: String,
    info: DatasetInfo,
    recommendations: Vec<TargetRecommendation>,
    validation_warning: Option<String>,
    validation_rejects: bool,
    last_model: Option<ModelReport>,
    // Configurable failure modes
    upload_fails: bool,
    preprocess_fails: bool,
    split_fails: bool,
    train_fails: bool,
    set_target_fails: bool,
    // When set, every call waits for one release before answering
    hold: Option<Arc<Notify>>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            dataset_id: "d1".to_string(),
            info: default_info(),
            recommendations: vec![TargetRecommendation {
                column: "species".to_string(),
                score: 100,
                unique_values: 3,
                reason: "Perfect for classification".to_string(),
            }],
            validation_warning: None,
            validation_rejects: false,
            last_model: None,
            upload_fails: false,
            preprocess_fails: false,
            split_fails: false,
            train_fails: false,
            set_target_fails: false,
            hold: None,
        }
    }
}

fn default_info() -> DatasetInfo {
    DatasetInfo {
        filename: "iris.csv".to_string(),
        rows: 150,
        columns: 5,
        column_names: vec![
            "sepal_length".to_string(),
            "sepal_width".to_string(),
            "petal_length".to_string(),
            "petal_width".to_string(),
            "species".to_string(),
        ],
        column_types: BTreeMap::from([
            ("sepal_length".to_string(), "float64".to_string()),
            ("species".to_string(), "object".to_string()),
        ]),
        missing_values: BTreeMap::new(),
        target_column: None,
    }
}

/// Fake backend with call recording for testing
#[derive(Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Change the dataset id handed out on upload
    pub fn set_dataset_id(&self, id: impl Into<String>) {
        self.lock().dataset_id = id.into();
    }

    /// Change the dataset shape served by upload/info/preview
    pub fn set_info(&self, info: DatasetInfo) {
        self.lock().info = info;
    }

    pub fn set_recommendations(&self, recommendations: Vec<TargetRecommendation>) {
        self.lock().recommendations = recommendations;
    }

    /// Attach a warning to subsequent target validations
    pub fn set_validation_warning(&self, warning: impl Into<String>) {
        self.lock().validation_warning = Some(warning.into());
    }

    /// Make subsequent target validations come back unusable
    pub fn set_validation_rejects(&self, rejects: bool) {
        self.lock().validation_rejects = rejects;
    }

    // Failure switches, one per stage endpoint

    pub fn set_upload_fails(&self, fails: bool) {
        self.lock().upload_fails = fails;
    }

    pub fn set_preprocess_fails(&self, fails: bool) {
        self.lock().preprocess_fails = fails;
    }

    pub fn set_split_fails(&self, fails: bool) {
        self.lock().split_fails = fails;
    }

    pub fn set_train_fails(&self, fails: bool) {
        self.lock().train_fails = fails;
    }

    pub fn set_set_target_fails(&self, fails: bool) {
        self.lock().set_target_fails = fails;
    }

    /// Hold every subsequent call until [`FakeBackend::release`] is called
    /// once per held call.
    pub fn pause(&self) {
        self.lock().hold = Some(Arc::new(Notify::new()));
    }

    /// Let one held call proceed.
    pub fn release(&self) {
        let gate = self.lock().hold.clone();
        if let Some(gate) = gate {
            gate.notify_one();
        }
    }

    /// Stop holding calls.
    pub fn resume(&self) {
        self.lock().hold = None;
    }

    async fn gate(&self) {
        let gate = self.lock().hold.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn record(&self, call: ApiCall) {
        self.lock().calls.push(call);
    }

    fn scripted_failure(&self, what: &str) -> ApiError {
        ApiError::Backend {
            status: 500,
            detail: format!("scripted {what} failure"),
        }
    }
}

#[async_trait]
impl MlBackend for FakeBackend {
    async fn upload_dataset(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        self.record(ApiCall::Upload {
            filename: filename.to_string(),
            size: bytes.len(),
        });
        self.gate().await;
        let state = self.lock();
        if state.upload_fails {
            return Err(self.scripted_failure("upload"));
        }
        let mut info = state.info.clone();
        info.filename = filename.to_string();
        Ok(UploadResponse {
            success: true,
            message: "File uploaded successfully".to_string(),
            dataset_id: state.dataset_id.clone(),
            info,
        })
    }

    async fn dataset_info(&self, dataset_id: &str) -> Result<DatasetInfo, ApiError> {
        self.record(ApiCall::DatasetInfo {
            dataset_id: dataset_id.to_string(),
        });
        self.gate().await;
        Ok(self.lock().info.clone())
    }

    async fn dataset_preview(
        &self,
        dataset_id: &str,
        num_rows: u32,
    ) -> Result<DatasetPreview, ApiError> {
        self.record(ApiCall::Preview {
            dataset_id: dataset_id.to_string(),
            num_rows,
        });
        self.gate().await;
        let state = self.lock();
        let available = state.info.rows.min(u64::from(num_rows)) as usize;
        let mut rows = Vec::with_capacity(available);
        for i in 0..available {
            let mut row = serde_json::Map::new();
            for name in &state.info.column_names {
                row.insert(name.clone(), serde_json::json!(i));
            }
            rows.push(row);
        }
        Ok(DatasetPreview {
            info: state.info.clone(),
            preview: rows,
            statistics: None,
            column_categories: BTreeMap::new(),
            unique_counts: BTreeMap::new(),
        })
    }

    async fn preprocess(&self, req: &PreprocessRequest) -> Result<PreprocessResponse, ApiError> {
        self.record(ApiCall::Preprocess {
            dataset_id: req.dataset_id.clone(),
            scaler: req.scaler_type,
        });
        self.gate().await;
        if self.lock().preprocess_fails {
            return Err(self.scripted_failure("preprocess"));
        }
        Ok(PreprocessResponse {
            success: true,
            message: "Preprocessing applied".to_string(),
            dataset_id: req.dataset_id.clone(),
            scaler_applied: req.scaler_type.wire_name().to_string(),
            columns_scaled: req.columns_to_scale.clone().unwrap_or_default(),
        })
    }

    async fn train_test_split(&self, req: &SplitRequest) -> Result<SplitResponse, ApiError> {
        self.record(ApiCall::Split {
            dataset_id: req.dataset_id.clone(),
            test_size: req.test_size,
            target_column: req.target_column.clone(),
        });
        self.gate().await;
        let state = self.lock();
        if state.split_fails {
            return Err(self.scripted_failure("split"));
        }
        let rows = state.info.rows;
        let test_rows = (rows as f64 * req.test_size).round() as u64;
        Ok(SplitResponse {
            success: true,
            message: "Split complete".to_string(),
            dataset_id: req.dataset_id.clone(),
            train_size: rows.saturating_sub(test_rows),
            test_size: test_rows,
            target_column: req.target_column.clone(),
        })
    }

    async fn train_model(&self, req: &TrainRequest) -> Result<TrainResponse, ApiError> {
        self.record(ApiCall::Train {
            dataset_id: req.dataset_id.clone(),
            model_type: req.model_type,
            target_column: req.target_column.clone(),
        });
        self.gate().await;
        let mut state = self.lock();
        if state.train_fails {
            return Err(self.scripted_failure("train"));
        }
        let response = TrainResponse {
            success: true,
            message: "Model trained successfully".to_string(),
            model_id: format!("{}_{}", req.dataset_id, req.model_type),
            model_type: req.model_type,
            accuracy: 0.93,
            precision: Some(0.92),
            recall: Some(0.94),
            f1_score: Some(0.93),
            confusion_matrix: Some(vec![vec![42, 3], vec![4, 51]]),
            class_labels: None,
            r2_score: None,
            rmse: None,
            mae: None,
            feature_importance: Some(BTreeMap::from([
                ("petal_length".to_string(), 0.6),
                ("petal_width".to_string(), 0.4),
            ])),
        };
        state.last_model = Some(response.clone().into_report());
        Ok(response)
    }

    async fn model_report(&self, model_id: &str) -> Result<ModelReport, ApiError> {
        self.record(ApiCall::ModelReport {
            model_id: model_id.to_string(),
        });
        self.gate().await;
        let state = self.lock();
        match &state.last_model {
            Some(report) if report.model_id == model_id => Ok(report.clone()),
            _ => Err(ApiError::Backend {
                status: 404,
                detail: format!("Model {model_id} not found"),
            }),
        }
    }

    async fn target_recommendations(
        &self,
        dataset_id: &str,
    ) -> Result<TargetRecommendations, ApiError> {
        self.record(ApiCall::Recommendations {
            dataset_id: dataset_id.to_string(),
        });
        self.gate().await;
        let state = self.lock();
        Ok(TargetRecommendations {
            recommendations: state.recommendations.clone(),
            total_columns: state.info.columns,
        })
    }

    async fn set_target(&self, req: &SetTargetRequest) -> Result<TargetValidation, ApiError> {
        self.record(ApiCall::SetTarget {
            dataset_id: req.dataset_id.clone(),
            target_column: req.target_column.clone(),
        });
        self.gate().await;
        let state = self.lock();
        if state.set_target_fails {
            return Err(self.scripted_failure("set-target"));
        }
        if state.validation_rejects {
            return Ok(TargetValidation {
                is_valid: false,
                column_name: req.target_column.clone(),
                unique_values: state.info.rows,
                data_type: "float64".to_string(),
                warning: Some("Too many unique values for classification".to_string()),
                suggestion: Some("species".to_string()),
            });
        }
        Ok(TargetValidation {
            is_valid: true,
            column_name: req.target_column.clone(),
            unique_values: 3,
            data_type: "object".to_string(),
            warning: state.validation_warning.clone(),
            suggestion: None,
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
