// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml status` - Pipeline progress and per-stage state

use crate::context::PipelineContext;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use flowml_core::{project, stage_display, PipelineStore, Stage, StageDisplay, StageStatus};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct StatusArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct StageLine {
    stage: Stage,
    status: StageStatus,
    position: StageDisplay,
    detail: String,
}

#[derive(Serialize)]
pub struct StatusReport {
    step: u8,
    percent: u8,
    target_column: Option<String>,
    stages: Vec<StageLine>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline: step {} of 5 ({}%)", self.step, self.percent)?;
        if let Some(target) = &self.target_column {
            writeln!(f, "Target: {target}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:<11} {:<11} DETAIL",
            "STAGE", "STATUS", "POSITION"
        )?;
        for line in &self.stages {
            writeln!(
                f,
                "{:<12} {:<11} {:<11} {}",
                line.stage.name(),
                line.status.label(line.stage),
                line.position,
                line.detail
            )?;
        }
        Ok(())
    }
}

pub fn build_report(store: &PipelineStore) -> StatusReport {
    let projection = project(store);
    let stages = Stage::ALL
        .iter()
        .map(|&stage| StageLine {
            stage,
            status: store.stage_status(stage),
            position: stage_display(store, stage),
            detail: detail(store, stage),
        })
        .collect();
    StatusReport {
        step: projection.step,
        percent: projection.percent,
        target_column: store.target_column().map(str::to_string),
        stages,
    }
}

fn detail(store: &PipelineStore, stage: Stage) -> String {
    match stage {
        Stage::Upload => store
            .dataset_info()
            .map(|info| {
                format!(
                    "{} ({} rows x {} columns)",
                    info.filename, info.rows, info.columns
                )
            })
            .unwrap_or_else(|| "-".to_string()),
        Stage::Preprocess => "-".to_string(),
        Stage::Split => store
            .split_summary()
            .map(|s| format!("{} train / {} test rows", s.train_rows, s.test_rows))
            .unwrap_or_else(|| "-".to_string()),
        Stage::Train | Stage::Results => store
            .model_results()
            .map(|r| format!("{} ({:.1}% accuracy)", r.model_id, r.accuracy * 100.0))
            .unwrap_or_else(|| "-".to_string()),
    }
}

pub fn handle(args: StatusArgs) -> Result<()> {
    let ctx = PipelineContext::load()?;
    let report = build_report(&ctx.snapshot());
    output::print(&report, args.format)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
