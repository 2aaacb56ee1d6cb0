// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress projection
//!
//! Derives a single current-step index (1..=5) and a completion percentage
//! from the four stage statuses, plus a per-stage display state. Display
//! only; nothing here feeds back into gating.

use crate::stage::{Stage, StageStatus};
use crate::store::PipelineStore;
use serde::Serialize;

pub const TOTAL_STEPS: u8 = 5;

/// Current step and completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub step: u8,
    pub percent: u8,
}

/// How a stage should be presented relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageDisplay {
    Complete,
    Processing,
    Current,
    Upcoming,
}

impl std::fmt::Display for StageDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageDisplay::Complete => "complete",
            StageDisplay::Processing => "processing",
            StageDisplay::Current => "current",
            StageDisplay::Upcoming => "upcoming",
        };
        f.pad(name)
    }
}

/// Priority ladder, highest step wins. The order decides which stage is
/// highlighted as current versus complete and must not be reordered.
fn current_step(store: &PipelineStore) -> u8 {
    let model = store.model_status();
    let split = store.split_status();
    let preprocess = store.preprocess_status();
    let upload = store.upload_status();

    if model.is_success() {
        5
    } else if model.is_in_flight() || split.is_success() {
        4
    } else if split.is_in_flight() || preprocess.is_success() {
        3
    } else if preprocess.is_in_flight() || upload.is_success() {
        2
    } else {
        1
    }
}

pub fn project(store: &PipelineStore) -> Projection {
    let step = current_step(store);
    let percent = (u16::from(step) * 100 / u16::from(TOTAL_STEPS)) as u8;
    Projection { step, percent }
}

/// Display state of one stage given the current step.
pub fn stage_display(store: &PipelineStore, stage: Stage) -> StageDisplay {
    let step = current_step(store);
    let ordinal = stage.ordinal();
    if ordinal < step {
        StageDisplay::Complete
    } else if ordinal == step {
        if store.stage_status(stage) == StageStatus::InFlight {
            StageDisplay::Processing
        } else {
            StageDisplay::Current
        }
    } else {
        StageDisplay::Upcoming
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
