// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline session snapshot
//!
//! The CLI persists the pipeline store between invocations so stage
//! commands compose into one session. Snapshots are written only after an
//! action settles, so an in-flight status never reaches disk.

use crate::error::StorageError;
use flowml_core::PipelineStore;
use std::fs;
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE: &str = "pipeline.json";

/// Loads and saves the pipeline store under a state directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open (and create if needed) the state directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(SNAPSHOT_FILE),
        })
    }

    /// Load the snapshot, or a fresh store when none exists yet.
    pub fn load(&self) -> Result<PipelineStore, StorageError> {
        if !self.path.exists() {
            return Ok(PipelineStore::new());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, store: &PipelineStore) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the snapshot file. The next load starts a fresh session.
    pub fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
