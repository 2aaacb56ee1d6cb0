// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml split` - Materialize a train/test split

use crate::context::{ensure_completed, PipelineContext};
use anyhow::Result;
use clap::Args;
use flowml_api::wire::{DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use flowml_engine::SplitOptions;

#[derive(Args)]
pub struct SplitArgs {
    /// Fraction of rows held out for testing
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_fraction: f64,

    /// Random seed for a reproducible split
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn handle(args: SplitArgs) -> Result<()> {
    let ctx = PipelineContext::load()?;
    let outcome = ctx
        .runner
        .split(SplitOptions {
            test_fraction: args.test_fraction,
            seed: Some(args.seed.unwrap_or(DEFAULT_SEED)),
        })
        .await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    let snap = ctx.snapshot();
    if let Some(summary) = snap.split_summary() {
        println!(
            "Split complete: {} training rows, {} test rows (target '{}')",
            summary.train_rows, summary.test_rows, summary.target_column
        );
    }
    Ok(())
}
