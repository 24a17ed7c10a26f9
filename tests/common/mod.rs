#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use pocket_code_api::{config::AppConfig, middleware::AuthMode, router, server, AppState};
use reqwest::StatusCode;
use tokio::net::TcpListener;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Development preset without request logging, users group gated as given
pub fn test_config(users_auth: Option<AuthMode>) -> AppConfig {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    config.security.users_auth = users_auth;
    config
}

/// Serve the application on a free port inside the current test runtime
pub async fn spawn_server(config: AppConfig) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind test port {}", port))?;

    let state = AppState::from_config(&config);
    let app = router(&config, state);
    tokio::spawn(async move {
        if let Err(e) = server::serve_listener(app, listener).await {
            eprintln!("test server stopped: {e:?}");
        }
    });

    let server = TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub async fn spawn_default() -> Result<TestServer> {
    spawn_server(test_config(None)).await
}
