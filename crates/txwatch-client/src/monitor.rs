//! Bounded status polling for a broadcast transaction.

use std::sync::Arc;
use std::time::Duration;
use txwatch_types::{MonitorOutcome, Result, TxError, TxStatus};

use crate::StatusSource;

/// Monitor configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
    /// Extra polls allowed after the first one while the status is `PENDING`.
    pub max_retries: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5_000,
            max_retries: 10,
        }
    }
}

/// Callback invoked with every polled status, before it is acted on.
pub type StatusHandler = Box<dyn Fn(&TxStatus) + Send + Sync>;

/// Polls a [`StatusSource`] until a transaction settles.
pub struct TransactionMonitor {
    source: Arc<dyn StatusSource>,
    config: MonitorConfig,
    on_status: Option<StatusHandler>,
}

impl TransactionMonitor {
    pub fn new(
        source: Arc<dyn StatusSource>,
        config: MonitorConfig,
        on_status: Option<StatusHandler>,
    ) -> Self {
        Self { source, config, on_status }
    }

    /// Run one monitor loop for `tx_hash`.
    pub async fn run(&self, tx_hash: &str) -> Result<MonitorOutcome> {
        poll_until_settled(
            self.source.as_ref(),
            tx_hash,
            &self.config,
            self.on_status.as_ref(),
        )
        .await
    }
}

/// The poll loop shared by [`TransactionMonitor`] and the client.
///
/// The retry counter is checked before it is incremented, so at most
/// `max_retries + 1` polls are made. Status-check errors and unrecognized
/// codes end the loop immediately.
pub(crate) async fn poll_until_settled(
    source: &dyn StatusSource,
    tx_hash: &str,
    config: &MonitorConfig,
    on_status: Option<&StatusHandler>,
) -> Result<MonitorOutcome> {
    let interval = Duration::from_millis(config.poll_interval_ms);
    let mut retries = 0u32;

    loop {
        let status = source.fetch_status(tx_hash).await?;
        tracing::debug!(
            tx_hash,
            %status,
            attempt = attempt_number(retries),
            "polled transaction status"
        );

        if let Some(handler) = on_status {
            handler(&status);
        }

        let outcome = match status {
            TxStatus::Confirmed => MonitorOutcome::Confirmed,
            TxStatus::Failed => MonitorOutcome::Failed,
            TxStatus::DoesNotExist => MonitorOutcome::DoesNotExist,
            TxStatus::Pending => {
                if retries >= config.max_retries {
                    tracing::warn!(tx_hash, retries, "transaction still pending, giving up");
                    return Ok(MonitorOutcome::StillPending);
                }
                retries += 1;
                tokio::time::sleep(interval).await;
                continue;
            }
            TxStatus::Unrecognized(raw) => return Err(TxError::UnknownStatus(raw)),
        };

        tracing::info!(tx_hash, %outcome, "transaction settled");
        return Ok(outcome);
    }
}

/// One-based poll number; widened so the last poll of a `u32::MAX` budget fits.
fn attempt_number(retries: u32) -> u64 {
    u64::from(retries) + 1
}
