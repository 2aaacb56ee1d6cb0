// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flowml-core: Core library for the FlowML pipeline tool
//!
//! This crate provides:
//! - The stage/status model for the fixed upload → preprocess → split →
//!   train → results pipeline
//! - The pipeline store (single source of truth for dataset identity,
//!   stage statuses, and model results)
//! - Pure stage gates deciding which actions are currently permitted
//! - The progress projection derived from stage statuses
//!
//! Everything here is synchronous and side-effect free; orchestration of
//! backend calls lives in `flowml-engine`.

pub mod dataset;
pub mod gates;
pub mod model;
pub mod progress;
pub mod stage;
pub mod store;

// Re-exports
pub use dataset::{DatasetInfo, DatasetPreview};
pub use model::{ModelKind, ModelReport, ParseKindError, Scaler, SplitSummary};
pub use progress::{project, stage_display, Projection, StageDisplay, TOTAL_STEPS};
pub use stage::{Stage, StageStatus};
pub use store::PipelineStore;
