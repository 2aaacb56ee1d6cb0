// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml preview` - Show the first rows of the uploaded dataset

use crate::context::PipelineContext;
use anyhow::Result;
use clap::Args;
use flowml_api::wire::DEFAULT_PREVIEW_ROWS;

#[derive(Args)]
pub struct PreviewArgs {
    /// Number of rows to fetch
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: u32,
}

pub async fn handle(args: PreviewArgs) -> Result<()> {
    let ctx = PipelineContext::load()?;
    let preview = ctx.runner.load_preview(args.rows).await?;
    ctx.save()?;

    let columns = &preview.info.column_names;
    println!("{}", columns.join(","));
    for row in &preview.preview {
        let cells: Vec<String> = columns
            .iter()
            .map(|name| match row.get(name) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(value) => value.to_string(),
                None => String::new(),
            })
            .collect();
        println!("{}", cells.join(","));
    }
    println!();
    println!(
        "{} of {} rows ({} missing values across the dataset)",
        preview.row_count(),
        preview.info.rows,
        preview.info.total_missing()
    );
    Ok(())
}
