//! Throwaway API for job tests
//!
//! Binds an axum router on an ephemeral port that answers `POST /graphql`
//! with whatever the test decides, and records every request body.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tempfile::TempDir;

#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self::status(200, body)
    }

    pub fn status(code: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap(),
            body,
            delay: None,
        }
    }

    /// Answer only after `delay`, for timeout tests
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub type Requests = Arc<Mutex<Vec<Value>>>;

/// Serve the same reply to every request
pub async fn spawn(reply: Reply) -> String {
    spawn_with(move |_| reply.clone()).await.0
}

/// Serve a reply chosen per request body; returns the endpoint URL and the
/// recorded request bodies
pub async fn spawn_with<F>(respond: F) -> (String, Requests)
where
    F: Fn(&Value) -> Reply + Send + Sync + 'static,
{
    let requests: Requests = Arc::default();
    let recorded = requests.clone();
    let respond = Arc::new(respond);

    let app = Router::new().route(
        "/graphql",
        post(move |Json(body): Json<Value>| {
            let respond = respond.clone();
            let recorded = recorded.clone();
            async move {
                let reply = respond(&body);
                recorded.lock().unwrap().push(body);
                if let Some(delay) = reply.delay {
                    tokio::time::sleep(delay).await;
                }
                (reply.status, Json(reply.body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/graphql", addr), requests)
}

/// A log file inside its own temp dir, removed when dropped
pub struct TempLog {
    dir: TempDir,
    name: String,
}

impl TempLog {
    pub fn new(name: &str) -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            name: format!("{}.txt", name),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join(&self.name)
    }

    /// Lines written so far; empty when the job never created the file
    pub fn lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
