//! Backend HTTP API client.
//!
//! ## Routes
//!
//! | Method            | Route            | Payload field |
//! |-------------------|------------------|---------------|
//! | `status_page`     | `/api/status`    | `data`        |
//! | `monitors`        | `/api/monitors`  | `monitors`    |
//! | `agents`          | `/api/agents`    | `agents`      |
//!
//! ## Example
//!
//! ```rust,no_run
//! use statuswatch::ApiClient;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::builder()
//!         .endpoint("http://localhost:3000")
//!         .token("secret")
//!         .build()?;
//!
//!     let page = client.status_page(&CancellationToken::new()).await?;
//!     println!("{}: {} monitors", page.display_title(), page.monitors.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use statuswatch_types::{
    Agent, AgentListResponse, Envelope, Monitor, MonitorListResponse, StatusPageData,
    StatusPageResponse,
};

use super::open_envelope;
use crate::data::DashboardData;
use crate::error::{Error, Result};

/// Backend base URL used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// Transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const STATUS_ROUTE: &str = "/api/status";
const MONITORS_ROUTE: &str = "/api/monitors";
const AGENTS_ROUTE: &str = "/api/agents";

/// Client for the status backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the public status page.
    pub async fn status_page(&self, signal: &CancellationToken) -> Result<StatusPageData> {
        self.get::<StatusPageResponse>(STATUS_ROUTE, "data", signal).await
    }

    /// Fetch every monitor.
    pub async fn monitors(&self, signal: &CancellationToken) -> Result<Vec<Monitor>> {
        self.get::<MonitorListResponse>(MONITORS_ROUTE, "monitors", signal)
            .await
    }

    /// Fetch every agent.
    pub async fn agents(&self, signal: &CancellationToken) -> Result<Vec<Agent>> {
        self.get::<AgentListResponse>(AGENTS_ROUTE, "agents", signal).await
    }

    /// Fetch monitors and agents concurrently.
    ///
    /// Fails with the first error either request hits.
    pub async fn dashboard(&self, signal: &CancellationToken) -> Result<DashboardData> {
        let (monitors, agents) = tokio::try_join!(self.monitors(signal), self.agents(signal))?;
        Ok(DashboardData { monitors, agents })
    }

    async fn get<E>(&self, route: &str, field: &str, signal: &CancellationToken) -> Result<E::Payload>
    where
        E: Envelope + DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint, route);

        tokio::select! {
            biased;
            _ = signal.cancelled() => {
                debug!(url = %url, "Request cancelled");
                Err(Error::Cancelled)
            }
            result = self.request::<E>(&url, field) => result,
        }
    }

    async fn request<E>(&self, url: &str, field: &str) -> Result<E::Payload>
    where
        E: Envelope + DeserializeOwned,
    {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Error::NetworkFailure(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let envelope: E = serde_json::from_slice(&body)?;

        debug!(url = %url, bytes = body.len(), "Response received");
        open_envelope(envelope, field)
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    endpoint: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Set the backend base URL (default: `http://localhost:3000`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| Error::NetworkFailure(format!("failed to build HTTP client: {}", e)))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ApiClient {
            client,
            endpoint,
            token: self.token.filter(|t| !t.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one connection per canned `(route, status, body)`, matching on
    /// the request path. Returns the base URL and the request heads received.
    async fn serve(
        routes: Vec<(&'static str, u16, &'static str)>,
    ) -> (String, tokio::task::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut heads = Vec::new();
            for _ in 0..routes.len() {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]).to_string();

                let (status, body) = routes
                    .iter()
                    .find(|(route, _, _)| head.starts_with(&format!("GET {} ", route)))
                    .map(|(_, status, body)| (*status, *body))
                    .unwrap_or((404, "{}"));
                heads.push(head);

                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
            heads
        });

        (format!("http://{}", addr), handle)
    }

    fn client(endpoint: &str) -> ApiClient {
        ApiClient::builder().endpoint(endpoint).build().unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let client = ApiClient::builder().build().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_builder_custom() {
        let client = ApiClient::builder()
            .endpoint("https://status.example.com/")
            .token("abc")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "https://status.example.com");
        assert_eq!(client.token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_status_page_decodes() {
        let (url, server) = serve(vec![(
            "/api/status",
            200,
            r#"{"success":true,"data":{"title":"","description":"All good","monitors":[{"id":1,"name":"api","status":"up","uptime":99.5,"history":["up","down"]}],"agents":[]}}"#,
        )])
        .await;

        let page = client(&url).status_page(&CancellationToken::new()).await.unwrap();
        assert_eq!(page.display_title(), "System Status");
        assert_eq!(page.display_description(), "All good");
        assert_eq!(page.monitors[0].history.len(), 2);

        let heads = server.await.unwrap();
        assert!(heads[0].starts_with("GET /api/status "));
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let (url, server) = serve(vec![("/api/monitors", 200, r#"{"success":true,"monitors":[]}"#)]).await;

        let client = ApiClient::builder().endpoint(url).token("s3cret").build().unwrap();
        let monitors = client.monitors(&CancellationToken::new()).await.unwrap();
        assert!(monitors.is_empty());

        let heads = server.await.unwrap();
        assert!(heads[0].to_lowercase().contains("authorization: bearer s3cret"));
    }

    #[tokio::test]
    async fn test_http_error_is_network_failure() {
        let (url, _server) = serve(vec![("/api/agents", 500, r#"{"success":false}"#)]).await;

        let err = client(&url).agents(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, Error::NetworkFailure(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_backend_failure_message() {
        let (url, _server) = serve(vec![("/api/status", 200, r#"{"success":false,"message":"db offline"}"#)]).await;

        let err = client(&url).status_page(&CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, Error::NetworkFailure("db offline".into()));
    }

    #[tokio::test]
    async fn test_garbage_body_is_malformed() {
        let (url, _server) = serve(vec![("/api/status", 200, "<html>oops</html>")]).await;

        let err = client(&url).status_page(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .monitors(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn test_cancelled_signal_short_circuits() {
        // Nothing is listening; a cancelled signal must win without a request.
        let signal = CancellationToken::new();
        signal.cancel();

        let err = client("http://127.0.0.1:9").dashboard(&signal).await.unwrap_err();
        assert_eq!(err, Error::Cancelled);
    }

    #[tokio::test]
    async fn test_dashboard_fetches_both() {
        let (url, server) = serve(vec![
            ("/api/monitors", 200, r#"{"success":true,"monitors":[{"id":1,"status":"down"}]}"#),
            ("/api/agents", 200, r#"{"success":true,"agents":[{"id":7,"status":"active"}]}"#),
        ])
        .await;

        let data = client(&url).dashboard(&CancellationToken::new()).await.unwrap();
        assert_eq!(data.monitors[0].status, statuswatch_types::Status::Down);
        assert_eq!(data.agents[0].id, 7);

        let heads = server.await.unwrap();
        assert_eq!(heads.len(), 2);
    }
}
