//! CLI harness for exercising the ledger history scanner
//!
//! This tool allows testing:
//! - Full history scans against a live endpoint
//! - Window planning for given scan parameters
//! - Endpoint health (head block)

use alloy_primitives::Address;
use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use transcend_history::{plan_windows, HistoryScanner, LogSource, RpcClient, ScanConfig, ScanResult};
use transcend_params::Network;

#[derive(Parser)]
#[command(name = "scan-harness")]
#[command(about = "Transcend history scan testing harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an account's full history and print it as a table
    History {
        /// Account whose history to reconstruct
        #[arg(short, long)]
        account: String,

        /// Network name
        #[arg(short, long, default_value = "lisk-sepolia")]
        network: String,

        /// JSON-RPC endpoint (defaults to the network's endpoint)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Override the block-window size
        #[arg(long)]
        window_size: Option<u64>,

        /// Override the lookback depth in blocks
        #[arg(long)]
        lookback: Option<u64>,
    },

    /// Print the window plan for given parameters (offline)
    Windows {
        /// Chain head to plan from
        #[arg(long)]
        head: u64,

        /// Block-window size
        #[arg(long, default_value = "40000")]
        window_size: u64,

        /// Lookback depth in blocks
        #[arg(long, default_value = "500000")]
        lookback: u64,
    },

    /// Query the endpoint's current head block
    Head {
        /// Network name
        #[arg(short, long, default_value = "lisk-sepolia")]
        network: String,

        /// JSON-RPC endpoint (defaults to the network's endpoint)
        #[arg(short, long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::History {
            account,
            network,
            endpoint,
            window_size,
            lookback,
        } => {
            run_history(account, network, endpoint, window_size, lookback).await?;
        }
        Commands::Windows {
            head,
            window_size,
            lookback,
        } => {
            run_windows(head, window_size, lookback)?;
        }
        Commands::Head { network, endpoint } => {
            run_head(network, endpoint).await?;
        }
    }

    Ok(())
}

async fn run_history(
    account: String,
    network: String,
    endpoint: Option<String>,
    window_size: Option<u64>,
    lookback: Option<u64>,
) -> anyhow::Result<()> {
    let network = Network::from_name(&network)?;
    let endpoint = endpoint.unwrap_or_else(|| network.rpc_url.to_string());
    let account: Address = account
        .parse()
        .with_context(|| "invalid account address".to_string())?;

    info!("Scanning history for {account}");
    info!("Endpoint: {endpoint}");

    let client = Arc::new(RpcClient::new(endpoint)?);
    let mut config = ScanConfig::for_network(&network);
    if let Some(size) = window_size {
        config.window_size = size;
    }
    if let Some(depth) = lookback {
        config.max_lookback = depth;
    }

    let scanner = HistoryScanner::with_config(client, network.clone(), config);

    // Progress bar
    let progress = scanner.progress();
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {percent}% {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Spawn progress updater
    let pb_clone = pb.clone();
    let progress_task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(200)).await;
            pb_clone.set_position(progress.percentage() as u64);
            pb_clone.set_message(progress.summary());
            if progress.is_complete() {
                break;
            }
        }
    });

    match scanner.scan(account).await {
        Ok(result) => {
            progress_task.await?;
            pb.finish_and_clear();
            print_history(&network, &result);
            Ok(())
        }
        Err(e) => {
            progress_task.abort();
            pb.finish_and_clear();
            Err(e.into())
        }
    }
}

fn print_history(network: &Network, result: &ScanResult) {
    if result.entries.is_empty() {
        println!("No transactions found.");
    } else {
        println!(
            "{:<14} {:<10} {:<28} {:>24} {:<18}",
            "TX", "TYPE", "DESCRIPTION", "AMOUNT", "DATE"
        );
        for entry in &result.entries {
            println!(
                "{:<14} {:<10} {:<28} {:>24} {:<18}",
                short_hash(&entry.tx_hash.to_string()),
                entry.kind.label(),
                entry.description,
                format!("{} {}", entry.amount_display(), entry.asset_symbol),
                entry.timestamp.format("%Y-%m-%d %H:%M"),
            );
        }
        println!();
        println!("{} entries", result.entries.len());
        if let Some(entry) = result.entries.first() {
            println!("Latest: {}", network.explorer_tx_url(entry.tx_hash));
        }
    }

    if !result.is_complete() {
        warn!(
            "history may be incomplete: {} window(s) skipped",
            result.incomplete_windows.len()
        );
        for window in &result.incomplete_windows {
            warn!("  skipped {window}");
        }
    }
}

fn run_windows(head: u64, window_size: u64, lookback: u64) -> anyhow::Result<()> {
    let windows = plan_windows(head, window_size, lookback)?;
    for window in &windows {
        println!("{window}");
    }
    println!();
    println!(
        "{} windows covering blocks {}..={}",
        windows.len(),
        windows.last().map(|w| w.from_block).unwrap_or(0),
        head
    );
    Ok(())
}

async fn run_head(network: String, endpoint: Option<String>) -> anyhow::Result<()> {
    let network = Network::from_name(&network)?;
    let endpoint = endpoint.unwrap_or_else(|| network.rpc_url.to_string());
    let client = RpcClient::new(endpoint.clone())?;

    let head = client.head_block().await?;
    info!("Endpoint: {endpoint}");
    info!("Head block: {head}");
    Ok(())
}

/// Abbreviate a 0x hash for table display
fn short_hash(hash: &str) -> String {
    if hash.len() <= 12 {
        return hash.to_string();
    }
    format!("{}...{}", &hash[..6], &hash[hash.len() - 4..])
}
