// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Model training options and results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error parsing a scaler or model kind from its wire name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {what} \"{value}\" (expected one of: {expected})")]
pub struct ParseKindError {
    what: &'static str,
    value: String,
    expected: &'static str,
}

/// Feature scaling applied by the preprocess stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scaler {
    None,
    #[default]
    Standard,
    MinMax,
}

impl Scaler {
    pub fn wire_name(self) -> &'static str {
        match self {
            Scaler::None => "none",
            Scaler::Standard => "standard",
            Scaler::MinMax => "minmax",
        }
    }
}

impl std::fmt::Display for Scaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for Scaler {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Scaler::None),
            "standard" => Ok(Scaler::Standard),
            "minmax" => Ok(Scaler::MinMax),
            other => Err(ParseKindError {
                what: "scaler",
                value: other.to_string(),
                expected: "none, standard, minmax",
            }),
        }
    }
}

/// Model family trained by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    DecisionTree,
}

impl ModelKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => "logistic_regression",
            ModelKind::DecisionTree => "decision_tree",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logistic_regression" => Ok(ModelKind::LogisticRegression),
            "decision_tree" => Ok(ModelKind::DecisionTree),
            other => Err(ParseKindError {
                what: "model kind",
                value: other.to_string(),
                expected: "logistic_regression, decision_tree",
            }),
        }
    }
}

/// Row counts recorded when the split stage succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub train_rows: u64,
    pub test_rows: u64,
    pub target_column: String,
}

/// Training outcome as reported by the backend.
///
/// `accuracy` is always present; the remaining metrics depend on the model
/// family and problem shape. Exists in the store iff the train stage status
/// is success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub model_id: String,
    pub model_type: ModelKind,
    pub accuracy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f1_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<Vec<Vec<u64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mae: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importance: Option<BTreeMap<String, f64>>,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
