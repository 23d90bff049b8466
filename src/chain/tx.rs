//! Transaction building, submission, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build transactions with nonce, gas price guard, and gas estimation
//! - Submit signed transactions
//! - Poll receipts until the required confirmation depth is reached

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::chain::client::RpcClient;
use crate::chain::types::{ChainError, ChainResult};

/// Relevant receipt fields of a confirmed transaction.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmedTx {
    /// Block the transaction was mined in.
    pub block_number: u64,
    /// Address of the created contract, for deployments.
    pub contract_address: Option<Address>,
}

/// Sequential submit-then-confirm pipeline over an [`RpcClient`].
#[derive(Debug, Clone)]
pub struct TxPipeline {
    client: RpcClient,
}

impl TxPipeline {
    /// Create a new pipeline.
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Build and submit a transaction; returns its hash.
    ///
    /// `to = None` submits a contract deployment with `data` as the
    /// deployment bytecode. The nonce is synced from the chain on every
    /// call; the pipeline is strictly sequential so no two submissions
    /// can race on it.
    pub async fn submit(
        &self,
        from: Address,
        to: Option<Address>,
        data: Bytes,
    ) -> ChainResult<TxHash> {
        let nonce = self.client.get_transaction_count(from).await?;

        let gas_price = self.client.get_gas_price().await?;
        let config = self.client.config();
        let adjusted_gas_price = adjust_gas_price(
            gas_price,
            config.gas_price_multiplier,
            config.max_gas_price_gwei,
        )?;

        let mut tx = TransactionRequest::default()
            .with_from(from)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(config.chain_id);
        tx = match to {
            Some(to) => tx.with_to(to).with_input(data),
            None => tx.with_deploy_code(data),
        };

        let gas_limit = self.client.estimate_gas(&tx).await?;
        let tx = tx.with_gas_limit(gas_limit);

        self.client.send_transaction(tx).await
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// Polls the receipt every two seconds until the configured
    /// confirmation depth is reached or the overall timeout expires.
    pub async fn wait_for_confirmation(&self, tx_hash: TxHash) -> ChainResult<ConfirmedTx> {
        let required_confirmations = self.client.confirmation_blocks();
        let timeout_secs = self.client.config().confirmation_timeout_secs;
        let poll_interval = Duration::from_secs(2);

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                // Get the receipt
                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                // Check if transaction succeeded
                if !receipt.status() {
                    return Err(ChainError::Reverted(format!("{tx_hash}")));
                }

                // Get current block number
                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = confirmation_depth(current_block, tx_block);

                if confirmations >= required_confirmations {
                    return Ok(ConfirmedTx {
                        block_number: tx_block,
                        contract_address: receipt.contract_address,
                    });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::ConfirmationTimeout(timeout_secs)),
        }
    }
}

/// Confirmation depth of a transaction mined in `tx_block` when the head is
/// at `current_block`. Inclusion counts as the first confirmation, so depth 1
/// is satisfied the moment the receipt lands — demand-mined nodes never
/// produce a follow-up block. A head lagging behind the receipt reports none.
fn confirmation_depth(current_block: u64, tx_block: u64) -> u32 {
    if current_block < tx_block {
        return 0;
    }
    u32::try_from(current_block - tx_block + 1).unwrap_or(u32::MAX)
}

/// Apply the safety multiplier after guarding against price spikes.
fn adjust_gas_price(gas_price: u128, multiplier: f64, max_gwei: u64) -> ChainResult<u128> {
    let gas_price_gwei = gas_price / 1_000_000_000;
    if gas_price_gwei > max_gwei as u128 {
        return Err(ChainError::GasPriceTooHigh {
            current_gwei: gas_price_gwei as u64,
            max_gwei,
        });
    }
    Ok((gas_price as f64 * multiplier) as u128)
}
