//! Stage-by-stage pipeline specs
//!
//! Drive the pipeline one command at a time and verify gating, progress,
//! and the implicit split.

use crate::prelude::*;

#[test]
fn upload_reports_the_dataset_shape() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session
        .flowml()
        .args(["upload", "iris.csv"])
        .passes()
        .stdout_has("Uploaded iris.csv: 150 rows x 5 columns (dataset d1)");

    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("Pipeline: step 2 of 5 (40%)");
}

#[test]
fn stage_order_is_enforced() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    // No target chosen yet: both split and train stay gated.
    session
        .flowml()
        .arg("split")
        .fails()
        .stderr_has("prerequisites not met");
    session
        .flowml()
        .arg("train")
        .fails()
        .stderr_has("prerequisites not met");
    assert_eq!(session.stub().hits().len(), 1);
}

#[test]
fn full_stage_sequence_reaches_results() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);

    session.flowml().args(["upload", "iris.csv"]).passes();
    session
        .flowml()
        .arg("preprocess")
        .passes()
        .stdout_has("Preprocessing complete (standard scaler)");
    session
        .flowml()
        .args(["target", "species"])
        .passes()
        .stdout_has("Target set to 'species'");
    session
        .flowml()
        .arg("split")
        .passes()
        .stdout_has("Split complete: 105 training rows, 45 test rows (target 'species')");
    session
        .flowml()
        .arg("train")
        .passes()
        .stdout_has("Trained logistic_regression (model d1_logistic_regression), accuracy 93.0%");

    session
        .flowml()
        .arg("results")
        .passes()
        .stdout_has("Model: d1_logistic_regression (logistic_regression)")
        .stdout_has("Accuracy:  93.0%")
        .stdout_has("Confusion matrix:");

    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("Pipeline: step 5 of 5 (100%)");
}

#[test]
fn train_without_split_runs_the_implicit_split() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();
    session.flowml().arg("preprocess").passes();
    session.flowml().args(["target", "species"]).passes();
    session.flowml().arg("train").passes();

    let hits = session.stub().hits();
    let split = hits
        .iter()
        .position(|h| h == "POST /api/v1/train-test-split")
        .unwrap();
    let train = hits
        .iter()
        .position(|h| h == "POST /api/v1/train-model")
        .unwrap();
    assert!(split < train);

    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("split        success")
        .stdout_has("105 train / 45 test rows");
}

#[test]
fn completed_stage_needs_a_reset_to_rerun() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    session
        .flowml()
        .args(["upload", "iris.csv"])
        .fails()
        .stderr_has("already done (reset to run again)");

    session.flowml().arg("reset").passes();
    session.flowml().args(["upload", "iris.csv"]).passes();
}

#[test]
fn failed_stage_can_be_retried_in_place() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    session.stub().fail("/api/v1/preprocess", 500, "worker crashed");
    session
        .flowml()
        .arg("preprocess")
        .fails()
        .stderr_has("worker crashed");

    // Same command again once the backend recovers; no reset needed.
    session.stub().recover("/api/v1/preprocess");
    session
        .flowml()
        .arg("preprocess")
        .passes()
        .stdout_has("Preprocessing complete");
}

#[test]
fn preview_prints_rows_and_shape() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    session
        .flowml()
        .arg("preview")
        .passes()
        .stdout_has("sepal_length,sepal_width,petal_length,petal_width,species")
        .stdout_has("5.1,3.5,1.4,0.2,setosa")
        .stdout_has("2 of 150 rows");
}

#[test]
fn target_recommend_lists_candidates() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    session
        .flowml()
        .args(["target", "--recommend"])
        .passes()
        .stdout_has("species")
        .stdout_has("score 100");
}
