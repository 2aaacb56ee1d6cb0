//! Local account specs
//!
//! Registration, login, logout, and whoami against the state directory.

use crate::prelude::*;

#[test]
fn register_logs_the_user_in() {
    let session = Session::fresh();
    session
        .flowml()
        .args([
            "auth",
            "register",
            "ada@example.com",
            "--name",
            "Ada",
            "--password",
            "hunter2",
        ])
        .passes()
        .stdout_has("Registered and logged in as Ada <ada@example.com>");

    session
        .flowml()
        .args(["auth", "whoami"])
        .passes()
        .stdout_has("Ada <ada@example.com>");
}

#[test]
fn duplicate_email_is_rejected() {
    let session = Session::fresh();
    let register = [
        "auth",
        "register",
        "ada@example.com",
        "--name",
        "Ada",
        "--password",
        "hunter2",
    ];
    session.flowml().args(register).passes();
    session
        .flowml()
        .args(register)
        .fails()
        .stderr_has("email already registered: ada@example.com");
}

#[test]
fn login_requires_exact_credentials() {
    let session = Session::fresh();
    session
        .flowml()
        .args([
            "auth",
            "register",
            "ada@example.com",
            "--name",
            "Ada",
            "--password",
            "hunter2",
        ])
        .passes();
    session.flowml().args(["auth", "logout"]).passes();

    session
        .flowml()
        .args(["auth", "login", "ada@example.com", "--password", "wrong"])
        .fails()
        .stderr_has("invalid email or password");

    session
        .flowml()
        .args(["auth", "login", "ada@example.com", "--password", "hunter2"])
        .passes()
        .stdout_has("Logged in as Ada <ada@example.com>");
}

#[test]
fn logout_clears_the_session() {
    let session = Session::fresh();
    session
        .flowml()
        .args([
            "auth",
            "register",
            "ada@example.com",
            "--name",
            "Ada",
            "--password",
            "hunter2",
        ])
        .passes();

    session.flowml().args(["auth", "logout"]).passes();
    session
        .flowml()
        .args(["auth", "whoami"])
        .passes()
        .stdout_eq("Not logged in.\n");

    // Logging out again is fine.
    session.flowml().args(["auth", "logout"]).passes();
}
