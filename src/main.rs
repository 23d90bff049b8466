//! NFT deployment-and-mint runner.
//!
//! Deploys the configured NFT contract over JSON-RPC and mints its initial
//! tokens to the deployer's address, strictly in order:
//!
//! ```text
//! artifacts/ (compiled blueprint)
//!     → artifacts (resolve bytecode + ABI)
//!     → chain (signer, RPC client, tx pipeline)
//!     → runner (deploy, confirm, mint ×N)
//!     → exit code 0 on full success, 1 on any failure
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::Address;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nft_deployer::config::loader::load_config;
use nft_deployer::config::schema::DeployerConfig;
use nft_deployer::runner::{self, AlloyBackend};

#[derive(Parser)]
#[command(name = "nft-deployer")]
#[command(about = "Deploy an NFT contract and mint its initial tokens", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "deployer.toml")]
    config: PathBuf,

    /// Override the JSON-RPC endpoint.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Override the blueprint name to deploy.
    #[arg(long)]
    contract: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nft_deployer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        match load_config(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(
                    path = %cli.config.display(),
                    error = %e,
                    "Failed to load configuration"
                );
                return ExitCode::FAILURE;
            }
        }
    } else {
        tracing::info!(
            path = %cli.config.display(),
            "No configuration file found, using defaults"
        );
        DeployerConfig::default()
    };

    if let Some(rpc_url) = cli.rpc_url {
        config.chain.rpc_url = rpc_url;
    }
    if let Some(contract) = cli.contract {
        config.artifacts.contract = contract;
    }

    match deploy_and_mint(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

async fn deploy_and_mint(config: DeployerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        rpc_url = %config.chain.rpc_url,
        chain_id = config.chain.chain_id,
        contract = %config.artifacts.contract,
        "Configuration loaded"
    );

    let recipient = config
        .mint
        .recipient
        .as_deref()
        .map(str::parse::<Address>)
        .transpose()?;

    let backend = AlloyBackend::connect(&config).await?;
    let report = runner::run(
        &backend,
        &config.artifacts.contract,
        &config.mint.descriptions,
        recipient,
    )
    .await?;

    tracing::info!(
        address = %report.contract_address,
        mints = report.mint_txs.len(),
        "Run complete"
    );
    Ok(())
}
