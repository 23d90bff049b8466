//! Signer account management.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::chain::types::{ChainError, ChainResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "NFT_DEPLOYER_PRIVATE_KEY";

/// The account used to deploy and to receive the minted tokens.
///
/// The EIP-155 chain ID is not part of the signer; the transaction pipeline
/// stamps it from configuration when building each transaction.
#[derive(Debug, Clone)]
pub struct DeployerSigner {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
}

impl DeployerSigner {
    /// Create a signer from a hex-encoded private key string.
    ///
    /// # Security
    /// The private key is parsed and stored securely. It is never logged.
    pub fn from_private_key(private_key_hex: &str) -> ChainResult<Self> {
        // Strip 0x prefix if present
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ChainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(
            address = %signer.address(),
            "Signer initialized"
        );

        Ok(Self { signer })
    }

    /// Load the signer from `NFT_DEPLOYER_PRIVATE_KEY`.
    ///
    /// Returns `Ok(None)` when the variable is unset (no account configured);
    /// a set but unparsable key is an error.
    pub fn from_env() -> ChainResult<Option<Self>> {
        match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(private_key) => Self::from_private_key(&private_key).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Convert into a wallet usable by the provider for local signing.
    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_signer_from_private_key() {
        let signer = DeployerSigner::from_private_key(TEST_PRIVATE_KEY).unwrap();
        // This is the corresponding address for the test key
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_signer_with_0x_prefix() {
        let signer =
            DeployerSigner::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = DeployerSigner::from_private_key("invalid_key");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_from_env() {
        // Set and unset paths share one test; env vars are process-global.
        std::env::remove_var(PRIVATE_KEY_ENV_VAR);
        assert!(DeployerSigner::from_env().unwrap().is_none());

        std::env::set_var(PRIVATE_KEY_ENV_VAR, TEST_PRIVATE_KEY);
        let signer = DeployerSigner::from_env().unwrap().unwrap();
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );

        std::env::set_var(PRIVATE_KEY_ENV_VAR, "not-a-key");
        assert!(DeployerSigner::from_env().is_err());

        std::env::remove_var(PRIVATE_KEY_ENV_VAR);
    }

    #[test]
    fn test_wallet_conversion() {
        let signer = DeployerSigner::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let wallet = signer.wallet();
        assert_eq!(
            alloy::network::NetworkWallet::<alloy::network::Ethereum>::default_signer_address(
                &wallet
            ),
            signer.address()
        );
    }
}
