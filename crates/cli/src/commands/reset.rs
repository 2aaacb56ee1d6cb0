// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml reset` - Discard the pipeline and start over

use crate::context::PipelineContext;
use anyhow::Result;

pub fn handle() -> Result<()> {
    let ctx = PipelineContext::load()?;
    ctx.runner.reset();
    ctx.save()?;
    println!("Pipeline reset.");
    Ok(())
}
