//! One-shot pipeline specs
//!
//! `flowml run` drives upload through training in a single invocation.

use crate::prelude::*;

#[test]
fn run_executes_the_whole_pipeline() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);

    session
        .flowml()
        .args(["run", "iris.csv", "--target", "species"])
        .passes()
        .stdout_has("[1/4] Uploading iris.csv...")
        .stdout_has("[4/4] Training logistic_regression...")
        .stdout_has("Done: d1_logistic_regression trained with 93.0% accuracy.");

    let hits = session.stub().hits();
    assert_eq!(hits[0], "POST /api/v1/upload");
    assert!(hits.contains(&"POST /api/v1/train-model".to_string()));
}

#[test]
fn run_picks_the_top_recommendation_without_a_target() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);

    session
        .flowml()
        .args(["run", "iris.csv"])
        .passes()
        .stdout_has("Using recommended target 'species'");
}

#[test]
fn run_refuses_to_clobber_an_existing_pipeline() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session.flowml().args(["upload", "iris.csv"]).passes();

    session
        .flowml()
        .args(["run", "iris.csv", "--target", "species"])
        .fails()
        .stderr_has("already in progress");
}

#[test]
fn run_stops_at_the_failing_stage() {
    let session = Session::fresh();
    session.file("iris.csv", IRIS_CSV);
    session
        .stub()
        .fail("/api/v1/train-model", 500, "Training failed: singular matrix");

    session
        .flowml()
        .args(["run", "iris.csv", "--target", "species"])
        .fails()
        .stderr_has("Training failed: singular matrix");

    // Earlier stages kept their progress; only train errored.
    session
        .flowml()
        .arg("status")
        .passes()
        .stdout_has("split        success")
        .stdout_has("train        error");
}
