#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use reqwest::StatusCode;
use tower::ServiceExt;

use cheflink_api::auth::{generate_jwt, Claims};
use cheflink_api::config::AppConfig;
use cheflink_api::database::Store;
use cheflink_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Set this to a reachable MongoDB to run the end-to-end suites
pub const MONGODB_ENV: &str = "CHEFLINK_TEST_MONGODB_URI";

// ---------------------------------------------------------------------------
// In-process router
// ---------------------------------------------------------------------------

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.database.uri = Some("mongodb://127.0.0.1:27017".to_string());
    config.api.enable_request_logging = false;
    config
}

/// Router over a client that never connects unless a handler reaches the
/// store; suitable for auth and validation paths.
pub async fn test_app() -> Router {
    test_app_with(test_config()).await
}

pub async fn test_app_with(config: AppConfig) -> Router {
    let store = Store::connect(
        "mongodb://127.0.0.1:27017/?serverSelectionTimeoutMS=500",
        "cheflink_in_process",
    )
    .await
    .expect("client construction does not touch the network");
    app(AppState::new(store, config))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// `token=<jwt>` for a cookie header
pub fn session_cookie_for(email: &str) -> String {
    let token = generate_jwt(&Claims::new(email, 1).unwrap(), TEST_SECRET).unwrap();
    format!("token={}", token)
}

// ---------------------------------------------------------------------------
// Spawned server against a real MongoDB
// ---------------------------------------------------------------------------

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn(mongodb_uri: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cheflink-api"));
        cmd.env("PORT", port.to_string())
            .env("BIND_ADDR", "127.0.0.1")
            .env("APP_ENV", "development")
            .env("MONGODB_URI", mongodb_uri)
            .env("DB_NAME", format!("cheflink_test_{}", std::process::id()))
            .env("ACCESS_TOKEN_SECRET", TEST_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start (once) and return the shared server.
///
/// The suites that call this are `#[ignore]`d; run them with
/// `CHEFLINK_TEST_MONGODB_URI=... cargo test -- --ignored`.
pub async fn ensure_server() -> Result<&'static TestServer> {
    let uri = std::env::var(MONGODB_ENV)
        .with_context(|| format!("{} must point at a MongoDB for end-to-end tests", MONGODB_ENV))?;

    let server = SERVER.get_or_init(|| TestServer::spawn(&uri).expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(server)
}

/// Unique suffix so parallel tests never share owners or food ids
pub fn unique(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}-{}", prefix, nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Extract `token=<jwt>` from a response's Set-Cookie headers
pub fn token_cookie(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
