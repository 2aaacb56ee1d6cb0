// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml preprocess` - Apply feature scaling

use crate::context::{ensure_completed, PipelineContext};
use anyhow::Result;
use clap::Args;
use flowml_core::Scaler;
use flowml_engine::PreprocessOptions;

#[derive(Args)]
pub struct PreprocessArgs {
    /// Scaler to apply (standard, minmax, none)
    #[arg(long, default_value = "standard")]
    pub scaler: String,

    /// Comma-separated columns to scale; all numeric columns if omitted
    #[arg(long)]
    pub columns: Option<String>,
}

pub async fn handle(args: PreprocessArgs) -> Result<()> {
    let scaler: Scaler = args.scaler.parse()?;
    let columns = args
        .columns
        .map(|list| list.split(',').map(|c| c.trim().to_string()).collect());

    let ctx = PipelineContext::load()?;
    let outcome = ctx
        .runner
        .preprocess(PreprocessOptions { scaler, columns })
        .await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    println!("Preprocessing complete ({scaler} scaler)");
    Ok(())
}
