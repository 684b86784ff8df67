//! Client for the transaction broadcast service.
//!
//! - Submit a price quote to `POST /broadcast`
//! - Query `GET /check/<tx_hash>`
//! - Poll a transaction until it settles or the retry budget runs out

use async_trait::async_trait;
use txwatch_types::Result;

pub mod client;
pub mod monitor;

pub use client::TransactionClient;
pub use monitor::{MonitorConfig, StatusHandler, TransactionMonitor};
pub use txwatch_types::{
    BroadcastRequest, MonitorOutcome, TransportError, TxError, TxHash, TxStatus,
};

/// Anything that can report the current status of a transaction.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, tx_hash: &str) -> Result<TxStatus>;
}
