//! Status, results, and reset specs

use crate::prelude::*;

#[test]
fn fresh_status_starts_at_step_one() {
    let session = Session::fresh();
    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("Pipeline: step 1 of 5 (20%)")
        .stdout_has("upload       idle        current")
        .stdout_has("results      idle        upcoming");
}

#[test]
fn status_json_is_machine_readable() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    let output = session
        .flowml()
        .args(["status", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["step"], 2);
    assert_eq!(value["percent"], 40);
    assert_eq!(value["stages"][0]["stage"], "upload");
    assert_eq!(value["stages"][0]["status"], "success");
    assert_eq!(value["stages"][1]["position"], "current");
}

#[test]
fn reset_clears_saved_state() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();
    session.flowml().args(["target", "species"]).passes();

    session
        .flowml()
        .arg("reset")
        .passes()
        .stdout_eq("Pipeline reset.\n");

    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("Pipeline: step 1 of 5 (20%)");
}

#[test]
fn results_before_training_fails() {
    let session = Session::fresh();
    session
        .flowml()
        .arg("results")
        .fails()
        .stderr_has("no trained model yet");
}

#[test]
fn results_refresh_refetches_the_report() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session
        .flowml()
        .args(["run", "iris.csv", "--target", "species"])
        .passes();

    session
        .flowml()
        .args(["results", "--refresh"])
        .passes()
        .stdout_has("Accuracy:  93.0%");

    let hits = session.stub().hits();
    assert!(hits.contains(&"GET /api/v1/model/d1_logistic_regression".to_string()));
}

#[test]
fn results_json_serializes_the_report() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session
        .flowml()
        .args(["run", "iris.csv", "--target", "species"])
        .passes();

    let output = session
        .flowml()
        .args(["results", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["model_id"], "d1_logistic_regression");
    assert_eq!(value["model_type"], "logistic_regression");
    assert_eq!(value["accuracy"], 0.93);
}
