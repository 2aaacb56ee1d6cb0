// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline stages and their status model
//!
//! The pipeline is a fixed chain: Upload → Preprocess → Split → Train →
//! Results. Each of the first four stages carries its own status; Results
//! has no independent status and mirrors Train's success.

use serde::{Deserialize, Serialize};

/// A step of the fixed pipeline, in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Upload,
    Preprocess,
    Split,
    Train,
    Results,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 5] = [
        Stage::Upload,
        Stage::Preprocess,
        Stage::Split,
        Stage::Train,
        Stage::Results,
    ];

    /// 1-based position in the pipeline, matching the progress step index.
    pub fn ordinal(self) -> u8 {
        match self {
            Stage::Upload => 1,
            Stage::Preprocess => 2,
            Stage::Split => 3,
            Stage::Train => 4,
            Stage::Results => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Upload => "upload",
            Stage::Preprocess => "preprocess",
            Stage::Split => "split",
            Stage::Train => "train",
            Stage::Results => "results",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The status of a single stage.
///
/// Transition rule (enforced by gates and action handlers, not here):
/// idle → in-flight on action start, in-flight → success|error on
/// settlement, error → in-flight again on retry. Success is terminal until
/// an explicit store reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Idle,
    InFlight,
    Success,
    Error,
}

impl StageStatus {
    pub fn is_idle(self) -> bool {
        matches!(self, StageStatus::Idle)
    }

    pub fn is_in_flight(self) -> bool {
        matches!(self, StageStatus::InFlight)
    }

    pub fn is_success(self) -> bool {
        matches!(self, StageStatus::Success)
    }

    pub fn is_error(self) -> bool {
        matches!(self, StageStatus::Error)
    }

    /// Settled one way or the other (success or error).
    pub fn is_settled(self) -> bool {
        matches!(self, StageStatus::Success | StageStatus::Error)
    }

    /// Display label for this status on a given stage. The in-flight
    /// variant is named per stage: uploading, processing, splitting,
    /// training.
    pub fn label(self, stage: Stage) -> &'static str {
        match self {
            StageStatus::Idle => "idle",
            StageStatus::Success => "success",
            StageStatus::Error => "error",
            StageStatus::InFlight => match stage {
                Stage::Upload => "uploading",
                Stage::Preprocess => "processing",
                Stage::Split => "splitting",
                Stage::Train | Stage::Results => "training",
            },
        }
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
