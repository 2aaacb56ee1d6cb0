// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml results` - Show metrics for the trained model

use crate::context::PipelineContext;
use crate::output::{self, OutputFormat};
use anyhow::{bail, Result};
use clap::Args;
use flowml_core::ModelReport;
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct ResultsArgs {
    /// Re-fetch the report from the backend before showing it
    #[arg(long)]
    pub refresh: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(transparent)]
struct ReportView(ModelReport);

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.0;
        writeln!(f, "Model: {} ({})", report.model_id, report.model_type)?;
        writeln!(f, "Accuracy:  {:.1}%", report.accuracy * 100.0)?;
        if let Some(precision) = report.precision {
            writeln!(f, "Precision: {:.1}%", precision * 100.0)?;
        }
        if let Some(recall) = report.recall {
            writeln!(f, "Recall:    {:.1}%", recall * 100.0)?;
        }
        if let Some(f1) = report.f1_score {
            writeln!(f, "F1 score:  {:.1}%", f1 * 100.0)?;
        }
        if let Some(r2) = report.r2_score {
            writeln!(f, "R2:        {r2:.3}")?;
        }
        if let Some(rmse) = report.rmse {
            writeln!(f, "RMSE:      {rmse:.3}")?;
        }
        if let Some(mae) = report.mae {
            writeln!(f, "MAE:       {mae:.3}")?;
        }
        if let Some(matrix) = &report.confusion_matrix {
            writeln!(f)?;
            writeln!(f, "Confusion matrix:")?;
            for row in matrix {
                let cells: Vec<String> = row.iter().map(|c| format!("{c:>6}")).collect();
                writeln!(f, "  {}", cells.join(" "))?;
            }
        }
        if let Some(importance) = &report.feature_importance {
            if !importance.is_empty() {
                writeln!(f)?;
                writeln!(f, "Feature importance:")?;
                for (feature, weight) in importance {
                    writeln!(f, "  {feature:<20} {weight:.2}")?;
                }
            }
        }
        Ok(())
    }
}

pub async fn handle(args: ResultsArgs) -> Result<()> {
    let ctx = PipelineContext::load()?;

    let report = if args.refresh {
        let report = ctx.runner.refresh_results().await?;
        ctx.save()?;
        report
    } else {
        match ctx.snapshot().model_results().cloned() {
            Some(report) => report,
            None => bail!("no trained model yet; run `flowml train` first"),
        }
    };

    output::print(&ReportView(report), args.format)
}
