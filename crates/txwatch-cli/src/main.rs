//! Broadcast one price quote and follow it until it settles.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txwatch_client::{
    BroadcastRequest, MonitorConfig, StatusHandler, TransactionClient, TxError, TxStatus,
};

#[derive(Debug, Parser)]
#[command(name = "txwatch", version, about = "Broadcast a price quote and monitor its status")]
struct Args {
    /// Base URL of the broadcast service.
    #[arg(
        long,
        env = "TXWATCH_BASE_URL",
        default_value = "https://mock-node-wgqbnxruha-as.a.run.app"
    )]
    base_url: String,

    #[arg(long, env = "TXWATCH_SYMBOL", default_value = "ETH")]
    symbol: String,

    #[arg(long, env = "TXWATCH_PRICE", default_value_t = 4500.0)]
    price: f64,

    /// Delay between status polls.
    #[arg(long, env = "TXWATCH_INTERVAL_MS", default_value_t = 5_000)]
    interval_ms: u64,

    /// Polls allowed after the first while the transaction is pending.
    #[arg(long, env = "TXWATCH_MAX_RETRIES", default_value_t = 15)]
    max_retries: u32,

    /// Per-request timeout; transport default when unset.
    #[arg(long, env = "TXWATCH_TIMEOUT_MS")]
    timeout_ms: Option<u64>,
}

async fn run(args: Args) -> Result<(), TxError> {
    let client = TransactionClient::new(&args.base_url, args.timeout_ms);

    let request = BroadcastRequest::new(args.symbol, args.price);
    let tx_hash = client.broadcast(&request).await?;
    println!("Transaction broadcasted with hash: {tx_hash}");

    let config = MonitorConfig {
        poll_interval_ms: args.interval_ms,
        max_retries: args.max_retries,
    };
    let on_status: StatusHandler =
        Box::new(|status: &TxStatus| println!("Transaction status: {status}"));

    let outcome = client.monitor(&tx_hash, &config, Some(&on_status)).await?;
    println!("Final transaction status: {outcome}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    tracing::debug!(base_url = %args.base_url, symbol = %args.symbol, "starting");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "transaction flow failed");
            ExitCode::FAILURE
        }
    }
}
