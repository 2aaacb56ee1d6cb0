// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! FlowML pipeline orchestration
//!
//! The runner drives the per-stage action protocol against an injected
//! store handle and any [`flowml_api::MlBackend`] implementation. Backend
//! failures never escape an action; they settle as the stage's error
//! status plus a reported outcome.

mod config;
mod error;
mod outcome;
mod runner;

pub use config::{ClientConfig, ConfigError, ENV_API_URL, ENV_STATE_DIR, ENV_TIMEOUT_MS};
pub use error::EngineError;
pub use outcome::{ActionOutcome, SkipReason};
pub use runner::{PipelineRunner, PreprocessOptions, SplitOptions, TrainOptions};
