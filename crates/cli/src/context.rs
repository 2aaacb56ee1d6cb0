// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring between the CLI, the backend client, and the saved session
//!
//! Every pipeline command loads the saved store, runs one action against
//! the configured backend, and saves the settled store back. Stage
//! actions always settle before a save, so an in-flight status never
//! reaches disk.

use anyhow::{bail, Result};
use flowml_api::HttpBackend;
use flowml_core::PipelineStore;
use flowml_engine::{ActionOutcome, ClientConfig, PipelineRunner};
use flowml_storage::{CredentialStore, SessionStore};
use std::sync::{Arc, Mutex};

pub struct PipelineContext {
    pub runner: PipelineRunner<HttpBackend>,
    session: SessionStore,
}

impl PipelineContext {
    /// Build a context from the environment.
    pub fn load() -> Result<Self> {
        Self::with_config(&ClientConfig::from_env()?)
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let session = SessionStore::open(&config.state_dir)?;
        let store = session.load()?;
        tracing::debug!(
            base_url = %config.base_url,
            state_dir = %config.state_dir.display(),
            generation = store.generation(),
            "session loaded"
        );
        let api = HttpBackend::new(&config.base_url, config.timeout)?;
        let runner = PipelineRunner::new(Arc::new(Mutex::new(store)), api);
        Ok(Self { runner, session })
    }

    /// Persist the current store snapshot.
    pub fn save(&self) -> Result<()> {
        self.session.save(&self.runner.snapshot())?;
        Ok(())
    }

    pub fn snapshot(&self) -> PipelineStore {
        self.runner.snapshot()
    }
}

/// Open the credential store under the configured state directory.
pub fn credentials() -> Result<CredentialStore> {
    let config = ClientConfig::from_env()?;
    Ok(CredentialStore::open(&config.state_dir)?)
}

/// Turn a settled action outcome into a command result. Anything other
/// than completion exits nonzero with the outcome's message.
pub fn ensure_completed(outcome: &ActionOutcome) -> Result<()> {
    match outcome {
        ActionOutcome::Completed => Ok(()),
        other => bail!("{other}"),
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
