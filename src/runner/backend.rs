//! Chain backend seam for the runner.
//!
//! The trait separates the sequencing contract from the transport so the
//! pipeline's ordering can be exercised against a scripted backend.
//! [`AlloyBackend`] is the production implementation over JSON-RPC.

use std::path::PathBuf;

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::artifacts::{self, Blueprint};
use crate::chain::client::RpcClient;
use crate::chain::signer::DeployerSigner;
use crate::chain::tx::TxPipeline;
use crate::chain::types::{ChainError, ChainResult};
use crate::config::schema::DeployerConfig;
use crate::runner::RunnerError;

sol! {
    /// Mint entry point of the NFT contract.
    function mint(address to, string description);
}

/// On-chain operations the runner sequences.
#[async_trait]
pub trait ChainBackend: Send + Sync {
    /// Resolve a contract blueprint by name.
    async fn resolve_blueprint(&self, name: &str) -> Result<Blueprint, RunnerError>;

    /// Resolve the first available signer account.
    async fn first_signer(&self) -> Result<Address, RunnerError>;

    /// Submit the deployment transaction for a blueprint.
    async fn submit_deployment(&self, blueprint: &Blueprint) -> Result<TxHash, RunnerError>;

    /// Suspend until the deployment is confirmed; returns the contract address.
    async fn confirm_deployment(&self, tx_hash: TxHash) -> Result<Address, RunnerError>;

    /// Submit a mint call against the deployed contract.
    async fn submit_mint(
        &self,
        contract: Address,
        to: Address,
        description: &str,
    ) -> Result<TxHash, RunnerError>;

    /// Suspend until a mint transaction is confirmed.
    async fn confirm_mint(&self, tx_hash: TxHash) -> Result<(), RunnerError>;
}

/// Production backend over JSON-RPC with local signing.
pub struct AlloyBackend {
    pipeline: TxPipeline,
    signer: Option<DeployerSigner>,
    artifacts_dir: PathBuf,
}

impl AlloyBackend {
    /// Connect to the configured chain.
    ///
    /// The signer is optional at this point; the runner surfaces its
    /// absence as `NoSigner` before submitting anything.
    pub async fn connect(config: &DeployerConfig) -> ChainResult<Self> {
        let signer = DeployerSigner::from_env()?;
        let client = RpcClient::new(
            config.chain.clone(),
            signer.as_ref().map(DeployerSigner::wallet),
        )
        .await?;

        Ok(Self {
            pipeline: TxPipeline::new(client),
            signer,
            artifacts_dir: PathBuf::from(&config.artifacts.dir),
        })
    }

    fn signer_address(&self) -> Result<Address, RunnerError> {
        self.signer
            .as_ref()
            .map(DeployerSigner::address)
            .ok_or(RunnerError::NoSigner)
    }
}

#[async_trait]
impl ChainBackend for AlloyBackend {
    async fn resolve_blueprint(&self, name: &str) -> Result<Blueprint, RunnerError> {
        artifacts::resolve(&self.artifacts_dir, name).map_err(RunnerError::Resolution)
    }

    async fn first_signer(&self) -> Result<Address, RunnerError> {
        self.signer_address()
    }

    async fn submit_deployment(&self, blueprint: &Blueprint) -> Result<TxHash, RunnerError> {
        let from = self.signer_address()?;
        self.pipeline
            .submit(from, None, blueprint.bytecode.clone())
            .await
            .map_err(RunnerError::Submission)
    }

    async fn confirm_deployment(&self, tx_hash: TxHash) -> Result<Address, RunnerError> {
        let confirmed = self
            .pipeline
            .wait_for_confirmation(tx_hash)
            .await
            .map_err(RunnerError::Confirmation)?;

        confirmed.contract_address.ok_or_else(|| {
            RunnerError::Confirmation(ChainError::Rpc(
                "Deployment receipt carries no contract address".to_string(),
            ))
        })
    }

    async fn submit_mint(
        &self,
        contract: Address,
        to: Address,
        description: &str,
    ) -> Result<TxHash, RunnerError> {
        let from = self.signer_address()?;
        let call = mintCall {
            to,
            description: description.to_string(),
        };
        self.pipeline
            .submit(from, Some(contract), Bytes::from(call.abi_encode()))
            .await
            .map_err(RunnerError::Submission)
    }

    async fn confirm_mint(&self, tx_hash: TxHash) -> Result<(), RunnerError> {
        self.pipeline
            .wait_for_confirmation(tx_hash)
            .await
            .map(|_| ())
            .map_err(RunnerError::Confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;

    #[test]
    fn test_mint_selector_matches_signature() {
        let expected = &keccak256(b"mint(address,string)")[..4];
        assert_eq!(&mintCall::SELECTOR[..], expected);
    }

    #[test]
    fn test_mint_calldata_roundtrip() {
        let to = Address::repeat_byte(0x42);
        let call = mintCall {
            to,
            description: "nft 1".to_string(),
        };
        let data = call.abi_encode();
        assert_eq!(&data[..4], &mintCall::SELECTOR[..]);

        let decoded = mintCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.to, to);
        assert_eq!(decoded.description, "nft 1");
    }
}
