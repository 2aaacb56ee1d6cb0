//! CLI surface specs
//!
//! Verify help output, version, and completion generation.

use crate::prelude::*;

#[test]
fn help_lists_pipeline_commands() {
    let session = Session::fresh();
    session
        .flowml()
        .arg("--help")
        .passes()
        .stdout_has("upload")
        .stdout_has("preprocess")
        .stdout_has("split")
        .stdout_has("train")
        .stdout_has("results");
}

#[test]
fn version_prints() {
    let session = Session::fresh();
    session
        .flowml()
        .arg("--version")
        .passes()
        .stdout_has("flowml");
}

#[test]
fn upload_help_names_the_accepted_formats() {
    let session = Session::fresh();
    session
        .flowml()
        .args(["upload", "--help"])
        .passes()
        .stdout_has("csv");
}

#[test]
fn completions_generate_for_bash() {
    let session = Session::fresh();
    session
        .flowml()
        .args(["completions", "bash"])
        .passes()
        .stdout_has("flowml");
}
