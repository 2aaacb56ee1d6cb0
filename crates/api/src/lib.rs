// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Typed client for the FlowML backend API
//!
//! The backend contract lives behind the [`MlBackend`] trait so the
//! orchestration layer can run against the real HTTP backend or the fake
//! one. Wire shapes mirror the backend exactly; nothing here interprets
//! dataset contents.

pub mod backend;
pub mod http;
pub mod wire;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use backend::{ApiError, MlBackend};
pub use http::HttpBackend;
pub use wire::{
    PreprocessRequest, PreprocessResponse, SetTargetRequest, SplitRequest, SplitResponse,
    TargetRecommendation, TargetRecommendations, TargetValidation, TrainRequest, TrainResponse,
    UploadResponse,
};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ApiCall, FakeBackend};
