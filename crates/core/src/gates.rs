// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage gates
//!
//! Pure predicates answering "may this stage's action run now?" given the
//! current store state. Gates never mutate anything; a false gate makes
//! the corresponding action a no-op.

use crate::store::PipelineStore;

/// Preprocess needs a successfully uploaded dataset.
pub fn can_preprocess(store: &PipelineStore) -> bool {
    store.upload_status().is_success() && store.dataset_id().is_some()
}

/// Split needs preprocessing done and a chosen target column.
pub fn can_split(store: &PipelineStore) -> bool {
    store.preprocess_status().is_success()
        && store.dataset_id().is_some()
        && store.target_column().is_some()
}

/// Train needs a dataset and a target column. An explicit split is not
/// required: the train action performs an implicit split with default
/// parameters when the split stage has not succeeded.
pub fn can_train(store: &PipelineStore) -> bool {
    store.dataset_id().is_some() && store.target_column().is_some()
}

/// Results are viewable once training succeeded and produced a report.
pub fn can_view_results(store: &PipelineStore) -> bool {
    store.model_status().is_success() && store.model_results().is_some()
}

#[cfg(test)]
#[path = "gates_tests.rs"]
mod tests;
