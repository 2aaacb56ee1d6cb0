// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml run <file> --target <column>` - Run the whole pipeline

use crate::context::{ensure_completed, PipelineContext};
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use flowml_core::{ModelKind, Scaler};
use flowml_engine::{PreprocessOptions, SplitOptions, TrainOptions};
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Dataset file (csv, xlsx, or xls)
    pub file: PathBuf,

    /// Column to predict; the top recommendation when omitted
    #[arg(long)]
    pub target: Option<String>,

    /// Scaler to apply (standard, minmax, none)
    #[arg(long, default_value = "standard")]
    pub scaler: String,

    /// Model to train (logistic_regression, decision_tree)
    #[arg(long, default_value = "logistic_regression")]
    pub model: String,
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let scaler: Scaler = args.scaler.parse()?;
    let model: ModelKind = args.model.parse()?;
    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("invalid file name: {}", args.file.display()))?
        .to_string();
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let ctx = PipelineContext::load()?;
    if ctx.snapshot().dataset_id().is_some() {
        bail!("a pipeline is already in progress; run `flowml reset` first");
    }

    println!("[1/4] Uploading {filename}...");
    let outcome = ctx.runner.upload(&filename, bytes).await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    println!("[2/4] Preprocessing ({scaler} scaler)...");
    let outcome = ctx
        .runner
        .preprocess(PreprocessOptions {
            scaler,
            columns: None,
        })
        .await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    let target = match args.target {
        Some(target) => target,
        None => {
            let recommendations = ctx.runner.target_recommendations().await?;
            let best = recommendations
                .recommendations
                .first()
                .ok_or_else(|| anyhow!("no target recommendation; pass --target"))?;
            println!("Using recommended target '{}' ({})", best.column, best.reason);
            best.column.clone()
        }
    };
    let validation = ctx.runner.choose_target(&target).await?;
    ctx.save()?;
    if !validation.is_valid {
        bail!("column '{}' is not usable as a target", validation.column_name);
    }

    println!("[3/4] Splitting train/test...");
    let outcome = ctx.runner.split(SplitOptions::default()).await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    println!("[4/4] Training {model}...");
    let outcome = ctx
        .runner
        .train(TrainOptions {
            model,
            hyperparameters: None,
        })
        .await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    let snap = ctx.snapshot();
    if let Some(report) = snap.model_results() {
        println!();
        println!(
            "Done: {} trained with {:.1}% accuracy. See `flowml results`.",
            report.model_id,
            report.accuracy * 100.0
        );
    }
    Ok(())
}
