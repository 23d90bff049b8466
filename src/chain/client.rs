//! JSON-RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoints (primary + failovers)
//! - Query chain state (block number, nonces, receipts)
//! - Submit signed transactions
//! - Handle timeouts and network errors gracefully

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainConfig, ChainError, ChainId, ChainResult};

/// JSON-RPC client wrapper with failover support.
#[derive(Clone)]
pub struct RpcClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: ChainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl RpcClient {
    /// Create a new RPC client.
    ///
    /// When a wallet is given, submitted transactions are signed locally
    /// with it before broadcast.
    pub async fn new(config: ChainConfig, wallet: Option<EthereumWallet>) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        // 1. Add primary provider
        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(build_provider(primary_url, wallet.as_ref()));

        // 2. Add failover providers
        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(build_provider(url, wallet.as_ref()));
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        let client = Self {
            providers,
            config: config.clone(),
            timeout_duration,
        };

        // Verify chain ID matches configuration. A mismatch is fatal for a
        // deployment tool; a merely unreachable endpoint is not, since the
        // runner surfaces that on first use.
        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "RPC client initialized"
                );
            }
            Err(e @ ChainError::ChainMismatch { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "RPC client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(ChainError::Rpc("All RPC providers failed".to_string()))
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> ChainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_block_number();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get block number".to_string()))
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> ChainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_count(address);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get transaction count".to_string()))
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> ChainResult<u128> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_gas_price();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get gas price".to_string()))
    }

    /// Estimate the gas limit for a transaction.
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> ChainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.estimate_gas(tx.clone());
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to estimate gas".to_string()))
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_receipt(tx_hash);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        Err(ChainError::Rpc("All providers failed to get receipt".to_string()))
    }

    /// Sign and submit a transaction via the primary provider.
    ///
    /// Submission never fails over: resubmitting the same nonce through a
    /// second endpoint risks a double broadcast.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> ChainResult<TxHash> {
        let fut = self.providers[0].send_transaction(tx);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(ChainError::Rpc(format!("Transaction rejected: {}", e))),
            Err(_) => Err(ChainError::Timeout(self.config.rpc_timeout_secs)),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Get the number of confirmation blocks required.
    pub fn confirmation_blocks(&self) -> u32 {
        self.config.confirmation_blocks
    }
}

fn build_provider(url: url::Url, wallet: Option<&EthereumWallet>) -> Arc<dyn Provider + Send + Sync> {
    match wallet {
        Some(wallet) => {
            Arc::new(ProviderBuilder::new().wallet(wallet.clone()).connect_http(url))
        }
        None => Arc::new(ProviderBuilder::new().connect_http(url)),
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
