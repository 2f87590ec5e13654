//! HTTP client abstraction used by the prober


use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::time::timeout;

/// User agent sent with every probe request
pub const USER_AGENT: &str = concat!("http-load-probe/", env!("CARGO_PKG_VERSION"));

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue one GET and wait for the full response.
    ///
    /// Any received response is `Ok`, whatever its status. `Err` means no
    /// response arrived.
    async fn get(&self, url: &str, timeout: Duration) -> Result<ProbeResponse>;
}

/// Response details the prober cares about
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    pub status_code: u16,
    pub body_size: usize,
}

/// reqwest-backed client; keeps no idle connections between requests
pub struct NetworkClient {
    client: Client,
}

impl NetworkClient {
    /// Create a new network client with the given default timeout
    pub fn new(default_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(default_timeout)
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for NetworkClient {
    async fn get(&self, url: &str, request_timeout: Duration) -> Result<ProbeResponse> {
        let url = Url::parse(url)
            .map_err(|e| AppError::parse(format!("Invalid URL: {}", e)))?;

        let request = self.client.get(url).timeout(request_timeout);

        // reqwest enforces the timeout too; this guard also bounds body reads
        let response = timeout(request_timeout, async {
            let response = request.send().await?;
            let status_code = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(ProbeResponse { status_code, body_size: body.len() })
        })
        .await
        .map_err(|_| AppError::timeout(format!("request timed out after {:.1}s", request_timeout.as_secs_f64())))?;

        response.map_err(AppError::from)
    }
}
