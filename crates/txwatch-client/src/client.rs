//! HTTP client for the transaction broadcast service.
//!
//! Endpoints:
//! - POST /broadcast
//! - GET /check/<tx_hash>

use async_trait::async_trait;
use std::time::Duration;
use txwatch_types::{
    BroadcastRequest, BroadcastResponse, CheckResponse, MonitorOutcome, Result, TransportError,
    TxError, TxHash, TxStatus,
};

use crate::monitor::{self, MonitorConfig, StatusHandler};
use crate::StatusSource;

/// Broadcast service client.
///
/// Holds only the base URL and a pooled HTTP client, so clones are cheap and
/// one instance can serve any number of concurrent monitor runs.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl TransactionClient {
    /// `timeout_ms = None` leaves request timeouts to the transport defaults.
    pub fn new(base_url: &str, timeout_ms: Option<u64>) -> Self {
        let timeout = timeout_ms.map(Duration::from_millis);
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().unwrap_or_default(),
            timeout,
        }
    }

    /// Use a caller-configured HTTP client.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one so a
    /// caller-supplied value can never escape its segment.
    fn endpoint(&self, segments: &[&str]) -> std::result::Result<reqwest::Url, TransportError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| TransportError::Request(format!("invalid base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::Request(format!("invalid base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Submit a quote for broadcast and return the service's tx hash.
    ///
    /// POST /broadcast
    pub async fn broadcast(&self, request: &BroadcastRequest) -> Result<TxHash> {
        let url = self.endpoint(&["broadcast"]).map_err(TxError::Broadcast)?;
        tracing::debug!(%url, symbol = %request.symbol, "broadcasting transaction");

        let mut req = self.client.post(url).json(request);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TxError::Broadcast(TransportError::Request(e.to_string())))?;

        if !resp.status().is_success() {
            return Err(TxError::Broadcast(TransportError::Status(
                resp.status().as_u16(),
            )));
        }

        let body: BroadcastResponse = resp
            .json()
            .await
            .map_err(|e| TxError::Broadcast(TransportError::Decode(e.to_string())))?;

        tracing::debug!(tx_hash = %body.tx_hash, "transaction broadcast accepted");
        Ok(body.tx_hash)
    }

    /// Query the current status of a transaction.
    ///
    /// GET /check/<tx_hash>
    pub async fn check_status(&self, tx_hash: &str) -> Result<TxStatus> {
        let url = self
            .endpoint(&["check", tx_hash])
            .map_err(TxError::StatusCheck)?;

        let mut req = self.client.get(url);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| TxError::StatusCheck(TransportError::Request(e.to_string())))?;

        if !resp.status().is_success() {
            return Err(TxError::StatusCheck(TransportError::Status(
                resp.status().as_u16(),
            )));
        }

        let body: CheckResponse = resp
            .json()
            .await
            .map_err(|e| TxError::StatusCheck(TransportError::Decode(e.to_string())))?;

        Ok(TxStatus::from(body.tx_status))
    }

    /// Poll `tx_hash` until it settles or `config.max_retries` is spent.
    pub async fn monitor(
        &self,
        tx_hash: &str,
        config: &MonitorConfig,
        on_status: Option<&StatusHandler>,
    ) -> Result<MonitorOutcome> {
        monitor::poll_until_settled(self, tx_hash, config, on_status).await
    }
}

#[async_trait]
impl StatusSource for TransactionClient {
    async fn fetch_status(&self, tx_hash: &str) -> Result<TxStatus> {
        self.check_status(tx_hash).await
    }
}
