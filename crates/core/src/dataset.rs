// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dataset metadata as reported by the backend
//!
//! These shapes are shared between the pipeline store and the wire layer:
//! the backend returns them verbatim and the store keeps them untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of an uploaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub filename: String,
    pub rows: u64,
    pub columns: u64,
    #[serde(default)]
    pub column_names: Vec<String>,
    /// Column name → dtype string (e.g. "int64", "object").
    #[serde(default)]
    pub column_types: BTreeMap<String, String>,
    /// Column name → count of missing cells.
    #[serde(default)]
    pub missing_values: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
}

impl DatasetInfo {
    /// Total missing cells across all columns.
    pub fn total_missing(&self) -> u64 {
        self.missing_values.values().sum()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }
}

/// A slice of dataset rows with per-column metadata, for display.
///
/// Rows are kept as opaque JSON objects; the client never interprets cell
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreview {
    pub info: DatasetInfo,
    #[serde(default)]
    pub preview: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<serde_json::Value>,
    /// Column name → "numeric" | "categorical".
    #[serde(default)]
    pub column_categories: BTreeMap<String, String>,
    #[serde(default)]
    pub unique_counts: BTreeMap<String, u64>,
}

impl DatasetPreview {
    pub fn row_count(&self) -> usize {
        self.preview.len()
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
