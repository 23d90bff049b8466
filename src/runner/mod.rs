//! Deployment-and-mint sequencing.
//!
//! The runner executes a fixed pipeline: resolve the blueprint, resolve the
//! signer, deploy and wait for confirmation, then mint each configured token
//! in order, waiting for confirmation between submissions. No two on-chain
//! operations are ever in flight at once, and a failure at any step aborts
//! the remainder without rollback.

pub mod backend;

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::artifacts::ArtifactError;
use crate::chain::types::ChainError;

pub use backend::{AlloyBackend, ChainBackend};

/// Errors that abort a deployment run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Blueprint name unknown or compilation artifacts absent.
    #[error("Blueprint resolution failed: {0}")]
    Resolution(#[from] ArtifactError),

    /// A transaction could not be submitted.
    #[error("Transaction submission failed: {0}")]
    Submission(ChainError),

    /// A transaction reverted or was never mined.
    #[error("Transaction confirmation failed: {0}")]
    Confirmation(ChainError),

    /// No usable signer account configured.
    #[error("No signer account available")]
    NoSigner,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Address of the deployed contract.
    pub contract_address: Address,
    /// Hash of the deployment transaction.
    pub deploy_tx: TxHash,
    /// Hashes of the mint transactions, in submission order.
    pub mint_txs: Vec<TxHash>,
}

/// Execute the full deploy-and-mint sequence.
///
/// The signer is resolved before the deployment is submitted: submission
/// requires a signing key, so a missing account fails the run before any
/// on-chain state is touched. Each mint targets `recipient` when given and
/// the signer's own address otherwise.
pub async fn run<B: ChainBackend>(
    backend: &B,
    contract_name: &str,
    descriptions: &[String],
    recipient: Option<Address>,
) -> Result<RunReport, RunnerError> {
    let blueprint = backend.resolve_blueprint(contract_name).await?;
    tracing::info!(contract = %blueprint.name, "Blueprint resolved");

    let signer = backend.first_signer().await?;
    let recipient = recipient.unwrap_or(signer);

    tracing::info!(contract = %blueprint.name, "Start deploying");
    let deploy_tx = backend.submit_deployment(&blueprint).await?;
    let contract_address = backend.confirm_deployment(deploy_tx).await?;
    tracing::info!(
        address = %contract_address,
        tx_hash = %deploy_tx,
        "Contract deployed"
    );

    tracing::info!(count = descriptions.len(), recipient = %recipient, "Minting nfts");
    let mut mint_txs = Vec::with_capacity(descriptions.len());
    for description in descriptions {
        let tx_hash = backend
            .submit_mint(contract_address, recipient, description)
            .await?;
        backend.confirm_mint(tx_hash).await?;
        tracing::info!(tx_hash = %tx_hash, description = %description, "Minted");
        mint_txs.push(tx_hash);
    }

    Ok(RunReport {
        contract_address,
        deploy_tx,
        mint_txs,
    })
}
