// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml train` - Train a model

use crate::context::{ensure_completed, PipelineContext};
use anyhow::{Context, Result};
use clap::Args;
use flowml_core::ModelKind;
use flowml_engine::TrainOptions;

#[derive(Args)]
pub struct TrainArgs {
    /// Model to train (logistic_regression, decision_tree)
    #[arg(long, default_value = "logistic_regression")]
    pub model: String,

    /// Extra hyperparameters as a JSON object
    #[arg(long)]
    pub hyperparameters: Option<String>,
}

pub async fn handle(args: TrainArgs) -> Result<()> {
    let model: ModelKind = args.model.parse()?;
    let hyperparameters = args
        .hyperparameters
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("parsing --hyperparameters")?;

    let ctx = PipelineContext::load()?;
    let outcome = ctx
        .runner
        .train(TrainOptions {
            model,
            hyperparameters,
        })
        .await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    let snap = ctx.snapshot();
    if let Some(report) = snap.model_results() {
        println!(
            "Trained {} (model {}), accuracy {:.1}%",
            report.model_type,
            report.model_id,
            report.accuracy * 100.0
        );
    }
    Ok(())
}
