#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use club_rankings_api::{app, storage::RosterStore, AppState};
use reqwest::StatusCode;
use serde_json::Value;
use tempfile::TempDir;

/// A server bound to a free local port, serving a roster kept in its own temp dir
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub roster_path: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    /// Start a server over a roster file initialised with `roster` (raw file content)
    pub async fn with_roster(roster: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create temp dir")?;
        let roster_path = dir.path().join("students.json");
        std::fs::write(&roster_path, roster).context("failed to write roster fixture")?;
        Self::start(dir, roster_path.clone(), AppState::with_roster_file(&roster_path)).await
    }

    /// Start a server whose roster file does not exist
    pub async fn without_roster() -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create temp dir")?;
        let roster_path = dir.path().join("students.json");
        Self::start(dir, roster_path.clone(), AppState::with_roster_file(&roster_path)).await
    }

    /// Start a server over a caller-provided store
    pub async fn with_store(store: Arc<dyn RosterStore>) -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create temp dir")?;
        let roster_path = dir.path().join("unused.json");
        Self::start(dir, roster_path, AppState::new(store)).await
    }

    async fn start(dir: TempDir, roster_path: PathBuf, state: AppState) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let router = app(state, dir.path());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self { port, base_url, roster_path, _dir: dir };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parsed roster file as it is on disk right now
    pub fn roster_on_disk(&self) -> Result<Value> {
        read_json(&self.roster_path)
    }
}

pub fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).context("roster on disk is not valid JSON")
}

pub fn success_flag(body: &Value) -> Option<bool> {
    body.get("success").and_then(|v| v.as_bool())
}
