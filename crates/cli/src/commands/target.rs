// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml target` - Choose or recommend the target column

use crate::context::PipelineContext;
use crate::output::{self, OutputFormat};
use anyhow::{bail, Result};
use clap::Args;
use flowml_api::TargetRecommendation;
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct TargetArgs {
    /// Column to predict
    pub column: Option<String>,

    /// List recommended target columns instead of setting one
    #[arg(long)]
    pub recommend: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(transparent)]
struct RecommendationView(TargetRecommendation);

impl fmt::Display for RecommendationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} score {:<4} {:<3} unique  {}",
            self.0.column, self.0.score, self.0.unique_values, self.0.reason
        )
    }
}

pub async fn handle(args: TargetArgs) -> Result<()> {
    let ctx = PipelineContext::load()?;

    if args.recommend {
        let recommendations = ctx.runner.target_recommendations().await?;
        let views: Vec<RecommendationView> = recommendations
            .recommendations
            .into_iter()
            .map(RecommendationView)
            .collect();
        if views.is_empty() {
            println!("No recommendations for this dataset.");
        } else {
            output::print_list(&views, args.format)?;
        }
        return Ok(());
    }

    let Some(column) = args.column else {
        bail!("provide a column name or pass --recommend");
    };

    let validation = ctx.runner.choose_target(&column).await?;
    ctx.save()?;

    if !validation.is_valid {
        let mut message = format!("column '{}' is not usable as a target", validation.column_name);
        if let Some(warning) = &validation.warning {
            message.push_str(&format!(": {warning}"));
        }
        if let Some(suggestion) = &validation.suggestion {
            message.push_str(&format!(" (try '{suggestion}')"));
        }
        bail!(message);
    }

    println!(
        "Target set to '{}' ({} unique values, {})",
        validation.column_name, validation.unique_values, validation.data_type
    );
    if let Some(warning) = &validation.warning {
        println!("Warning: {warning}");
    }
    Ok(())
}
