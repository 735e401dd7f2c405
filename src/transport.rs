// src/transport.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;

use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal GET capability the weather and news clients are written against.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport used by the binary.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(4))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError> {
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else if e.is_builder() {
                TransportError::Address(e.to_string())
            } else {
                TransportError::Request(e.to_string())
            }
        };

        // Feeds must never be served from an intermediate cache.
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(map_err)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(map_err)?;
        Ok(TransportResponse { status, body })
    }
}
