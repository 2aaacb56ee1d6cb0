//! CLI error surface specs
//!
//! Verify exit codes and error messages for user mistakes and backend
//! failures.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    let session = Session::fresh();
    session
        .flowml()
        .arg("bogus")
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn upload_missing_file_fails() {
    let session = Session::fresh();
    session
        .flowml()
        .args(["upload", "missing.csv"])
        .fails()
        .stderr_has("missing.csv");
}

#[test]
fn upload_rejects_unsupported_extensions_client_side() {
    let session = Session::fresh();
    session.file("notes.txt", "just some notes");

    session
        .flowml()
        .args(["upload", "notes.txt"])
        .fails()
        .stderr_has("unsupported file type");

    // The stage errored without any backend traffic.
    assert!(session.stub().hits().is_empty());
    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("upload       error");
}

#[test]
fn preprocess_before_upload_is_gated() {
    let session = Session::fresh();
    session
        .flowml()
        .arg("preprocess")
        .fails()
        .stderr_has("prerequisites not met");
    assert!(session.stub().hits().is_empty());
}

#[test]
fn backend_error_detail_reaches_stderr() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    session
        .stub()
        .fail("/api/v1/preprocess", 500, "Scaling failed: no numeric columns");
    session
        .flowml()
        .arg("preprocess")
        .fails()
        .stderr_has("Scaling failed: no numeric columns");

    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("preprocess   error");
}

#[test]
fn invalid_scaler_name_fails_before_any_call() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    session
        .flowml()
        .args(["preprocess", "--scaler", "quantile"])
        .fails()
        .stderr_has("quantile");
    assert_eq!(session.stub().hits().len(), 1);
}
