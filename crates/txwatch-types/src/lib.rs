//! Wire types, status codes and errors shared by the txwatch crates.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque transaction handle returned by the broadcast endpoint.
pub type TxHash = String;

/// Transport-level failure behind a broadcast or status check.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed response body: {0}")]
    Decode(String),
}

/// txwatch error types.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("failed to broadcast transaction: {0}")]
    Broadcast(TransportError),

    #[error("failed to check transaction status: {0}")]
    StatusCheck(TransportError),

    #[error("unknown transaction status: {0}")]
    UnknownStatus(String),
}

impl TxError {
    /// HTTP status code carried by the error, if the service answered non-2xx.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TxError::Broadcast(TransportError::Status(code))
            | TxError::StatusCheck(TransportError::Status(code)) => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TxError>;

/// Price quote submitted for broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub symbol: String,
    pub price: f64,
    pub timestamp: u64, // unix seconds
}

impl BroadcastRequest {
    /// Build a quote stamped with the current unix time.
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            symbol: symbol.into(),
            price,
            timestamp,
        }
    }
}

/// Body of a successful `POST /broadcast`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub tx_hash: TxHash,
}

/// Body of a successful `GET /check/<tx_hash>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub tx_status: String,
}

/// Transaction status as reported by the service.
///
/// Codes outside the known set are kept verbatim in `Unrecognized` so the
/// caller can report them; the monitor treats them as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    Confirmed,
    Failed,
    Pending,
    DoesNotExist,
    Unrecognized(String),
}

impl TxStatus {
    pub const CONFIRMED: &'static str = "CONFIRMED";
    pub const FAILED: &'static str = "FAILED";
    pub const PENDING: &'static str = "PENDING";
    pub const DNE: &'static str = "DNE";

    /// The raw wire code.
    pub fn as_str(&self) -> &str {
        match self {
            TxStatus::Confirmed => Self::CONFIRMED,
            TxStatus::Failed => Self::FAILED,
            TxStatus::Pending => Self::PENDING,
            TxStatus::DoesNotExist => Self::DNE,
            TxStatus::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<String> for TxStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            Self::CONFIRMED => TxStatus::Confirmed,
            Self::FAILED => TxStatus::Failed,
            Self::PENDING => TxStatus::Pending,
            Self::DNE => TxStatus::DoesNotExist,
            _ => TxStatus::Unrecognized(raw),
        }
    }
}

impl From<&str> for TxStatus {
    fn from(raw: &str) -> Self {
        TxStatus::from(raw.to_string())
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a monitor run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    Confirmed,
    Failed,
    DoesNotExist,
    StillPending,
}

impl fmt::Display for MonitorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MonitorOutcome::Confirmed => "Transaction confirmed",
            MonitorOutcome::Failed => "Transaction failed",
            MonitorOutcome::DoesNotExist => "Transaction does not exist",
            MonitorOutcome::StillPending => "Transaction is still pending after maximum retries",
        };
        f.write_str(msg)
    }
}
