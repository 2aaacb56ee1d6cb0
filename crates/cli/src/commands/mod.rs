// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod auth;
pub mod preprocess;
pub mod preview;
pub mod reset;
pub mod results;
pub mod run;
pub mod split;
pub mod status;
pub mod target;
pub mod train;
pub mod upload;
