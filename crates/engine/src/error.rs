// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use flowml_api::ApiError;
use thiserror::Error;

/// Errors from the non-stage helpers (target selection, preview, result
/// refresh). Stage actions never return errors; they settle into store
/// state and an [`crate::ActionOutcome`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no dataset uploaded yet")]
    NoDataset,
    #[error("no trained model to fetch results for")]
    NoModel,
    #[error(transparent)]
    Api(#[from] ApiError),
}
