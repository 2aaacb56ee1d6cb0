// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml upload <file>` - Upload a dataset to the backend

use crate::context::{ensure_completed, PipelineContext};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct UploadArgs {
    /// Dataset file (csv, xlsx, or xls)
    pub file: PathBuf,
}

pub async fn handle(args: UploadArgs) -> Result<()> {
    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("invalid file name: {}", args.file.display()))?
        .to_string();
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let ctx = PipelineContext::load()?;
    let outcome = ctx.runner.upload(&filename, bytes).await;
    ctx.save()?;
    ensure_completed(&outcome)?;

    let snap = ctx.snapshot();
    if let (Some(id), Some(info)) = (snap.dataset_id(), snap.dataset_info()) {
        println!(
            "Uploaded {}: {} rows x {} columns (dataset {})",
            info.filename, info.rows, info.columns, id
        );
    }
    Ok(())
}
