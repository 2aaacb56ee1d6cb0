// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settled result of one stage action

/// What happened to an invoked stage action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend call succeeded and the payload is merged into the store.
    Completed,
    /// Nothing ran and nothing changed.
    Skipped { reason: SkipReason },
    /// The action settled as the stage's error status.
    Failed { message: String },
    /// A reset happened while the call was in flight; the settlement was
    /// discarded and the store is untouched since that reset.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The stage gate is closed (missing prerequisites).
    GateClosed,
    /// The stage already has a call in flight.
    AlreadyInFlight,
    /// The stage already succeeded; reset to run it again.
    AlreadyDone,
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ActionOutcome::Skipped { .. })
    }
}

impl std::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionOutcome::Completed => write!(f, "completed"),
            ActionOutcome::Skipped {
                reason: SkipReason::GateClosed,
            } => write!(f, "skipped: prerequisites not met"),
            ActionOutcome::Skipped {
                reason: SkipReason::AlreadyInFlight,
            } => write!(f, "skipped: already in flight"),
            ActionOutcome::Skipped {
                reason: SkipReason::AlreadyDone,
            } => write!(f, "skipped: already done (reset to run again)"),
            ActionOutcome::Failed { message } => write!(f, "failed: {message}"),
            ActionOutcome::Superseded => write!(f, "superseded by reset"),
        }
    }
}
