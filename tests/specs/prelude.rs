//! Shared harness for CLI specs.
//!
//! [`Session`] gives each spec an isolated state directory and a stub
//! backend speaking just enough HTTP for the client. Specs drive the
//! real binary end to end; nothing here touches the network beyond
//! loopback.

use assert_cmd::Command;
use serde_json::json;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

pub const IRIS_CSV: &str = "\
sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.3,3.3,6.0,2.5,virginica
";

/// One isolated spec run: temp state dir + stub backend.
pub struct Session {
    dir: TempDir,
    stub: StubServer,
}

impl Session {
    pub fn fresh() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            stub: StubServer::start(),
        }
    }

    pub fn stub(&self) -> &StubServer {
        &self.stub
    }

    /// Drop a dataset file into the session directory.
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// A flowml command wired to this session's state dir and backend.
    pub fn flowml(&self) -> Command {
        let mut cmd = Command::cargo_bin("flowml").unwrap();
        cmd.current_dir(self.dir.path())
            .env("FLOWML_STATE_DIR", self.dir.path().join(".flowml"))
            .env("FLOWML_API_URL", self.stub.url())
            .env("FLOWML_TIMEOUT_MS", "5000")
            .env_remove("FLOWML_LOG");
        cmd
    }
}

/// Fluent assertions over a finished command.
pub struct Run(assert_cmd::assert::Assert);

impl Run {
    pub fn stdout_has(self, needle: &str) -> Self {
        Run(self.0.stdout(predicates::str::contains(needle.to_string())))
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        Run(self.0.stdout(expected.to_string()))
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        Run(self.0.stderr(predicates::str::contains(needle.to_string())))
    }
}

pub trait CommandExt {
    /// Run and require exit code 0.
    fn passes(&mut self) -> Run;
    /// Run and require a nonzero exit code.
    fn fails(&mut self) -> Run;
}

impl CommandExt for Command {
    fn passes(&mut self) -> Run {
        Run(self.assert().success())
    }

    fn fails(&mut self) -> Run {
        Run(self.assert().failure())
    }
}

/// Minimal scripted HTTP backend on a loopback listener.
///
/// Serves the iris fixture on every route the client uses. Routes can be
/// switched to a canned failure; every request is recorded.
pub struct StubServer {
    addr: SocketAddr,
    hits: Arc<Mutex<Vec<String>>>,
    failures: Arc<Mutex<HashMap<String, (u16, String)>>>,
}

impl StubServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let failures: Arc<Mutex<HashMap<String, (u16, String)>>> =
            Arc::new(Mutex::new(HashMap::new()));
        {
            let hits = Arc::clone(&hits);
            let failures = Arc::clone(&failures);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    let Ok(mut stream) = stream else { continue };
                    let Some((method, path, body)) = read_request(&mut stream) else {
                        continue;
                    };
                    let route = path.split('?').next().unwrap_or(&path).to_string();
                    hits.lock().unwrap().push(format!("{method} {route}"));
                    let failure = failures.lock().unwrap().get(&route).cloned();
                    if let Some((status, detail)) = failure {
                        respond(&mut stream, status, &json!({ "detail": detail }).to_string());
                        continue;
                    }
                    let (status, payload) = route_request(&method, &route, &body);
                    respond(&mut stream, status, &payload);
                }
            });
        }
        Self {
            addr,
            hits,
            failures,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make one route answer with an error payload from now on.
    pub fn fail(&self, route: &str, status: u16, detail: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(route.to_string(), (status, detail.to_string()));
    }

    /// Let a failed route answer normally again.
    pub fn recover(&self, route: &str) {
        self.failures.lock().unwrap().remove(route);
    }

    /// Recorded requests as "METHOD /path" strings, query stripped.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn read_request(stream: &mut TcpStream) -> Option<(String, String, Vec<u8>)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        match stream.read(&mut chunk) {
            Ok(0) => return None,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos;
                }
                if buf.len() > 1 << 20 {
                    return None;
                }
            }
            Err(_) => return None,
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => body.extend_from_slice(&chunk[..n]),
            Err(_) => break,
        }
    }
    Some((method, path, body))
}

fn respond(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        _ => "Internal Server Error",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
}

fn route_request(method: &str, path: &str, body: &[u8]) -> (u16, String) {
    match (method, path) {
        ("POST", "/api/v1/upload") => (
            200,
            json!({
                "success": true,
                "message": "File uploaded successfully",
                "dataset_id": "d1",
                "info": iris_info(),
            })
            .to_string(),
        ),
        ("POST", "/api/v1/preprocess") => (
            200,
            json!({
                "success": true,
                "message": "Preprocessing applied",
                "dataset_id": "d1",
                "scaler_applied": "standard",
                "columns_scaled": ["sepal_length", "sepal_width", "petal_length", "petal_width"],
            })
            .to_string(),
        ),
        ("POST", "/api/v1/train-test-split") => (
            200,
            json!({
                "success": true,
                "message": "Split complete",
                "dataset_id": "d1",
                "train_size": 105,
                "test_size": 45,
                "target_column": "species",
            })
            .to_string(),
        ),
        ("POST", "/api/v1/train-model") => (
            200,
            json!({
                "success": true,
                "message": "Model trained successfully",
                "model_id": "d1_logistic_regression",
                "model_type": "logistic_regression",
                "accuracy": 0.93,
                "precision": 0.92,
                "recall": 0.94,
                "f1_score": 0.93,
                "confusion_matrix": [[42, 3], [4, 51]],
                "feature_importance": { "petal_length": 0.6, "petal_width": 0.4 },
            })
            .to_string(),
        ),
        ("POST", "/api/v1/set-target") => {
            let column = serde_json::from_slice::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v["target_column"].as_str().map(str::to_string))
                .unwrap_or_default();
            (
                200,
                json!({
                    "is_valid": true,
                    "column_name": column,
                    "unique_values": 3,
                    "data_type": "object",
                })
                .to_string(),
            )
        }
        ("GET", "/api/v1/dataset/d1/target-recommendations") => (
            200,
            json!({
                "recommendations": [
                    {
                        "column": "species",
                        "score": 100,
                        "unique_values": 3,
                        "reason": "Low cardinality, good class balance",
                    },
                ],
                "total_columns": 5,
            })
            .to_string(),
        ),
        ("GET", "/api/v1/dataset/d1/preview") => (
            200,
            json!({
                "info": iris_info(),
                "preview": [
                    { "sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4,
                      "petal_width": 0.2, "species": "setosa" },
                    { "sepal_length": 7.0, "sepal_width": 3.2, "petal_length": 4.7,
                      "petal_width": 1.4, "species": "versicolor" },
                ],
            })
            .to_string(),
        ),
        ("GET", _) if path.starts_with("/api/v1/model/") => {
            let model_id = path.trim_start_matches("/api/v1/model/");
            (
                200,
                json!({
                    "model_id": model_id,
                    "model_type": "logistic_regression",
                    "accuracy": 0.93,
                    "precision": 0.92,
                    "recall": 0.94,
                    "f1_score": 0.93,
                })
                .to_string(),
            )
        }
        _ => (
            404,
            json!({ "detail": format!("no route: {method} {path}") }).to_string(),
        ),
    }
}

fn iris_info() -> serde_json::Value {
    json!({
        "filename": "iris.csv",
        "rows": 150,
        "columns": 5,
        "column_names": [
            "sepal_length", "sepal_width", "petal_length", "petal_width", "species",
        ],
        "column_types": {
            "sepal_length": "float64",
            "sepal_width": "float64",
            "petal_length": "float64",
            "petal_width": "float64",
            "species": "object",
        },
        "missing_values": {},
    })
}
