//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the deployer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the deployer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeployerConfig {
    /// Chain access settings (RPC endpoints, confirmations, gas).
    pub chain: ChainConfig,

    /// Compiled contract artifact settings.
    pub artifacts: ArtifactConfig,

    /// Mint sequence settings.
    pub mint: MintConfig,
}

/// Chain access configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a single transaction to confirm, in seconds.
    pub confirmation_timeout_secs: u64,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 120,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
        }
    }
}

/// Compiled artifact configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Root directory holding compiled artifact JSON files.
    pub dir: String,

    /// Blueprint name to deploy.
    pub contract: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: "artifacts".to_string(),
            contract: "MerkleNftV2".to_string(),
        }
    }
}

/// Mint sequence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MintConfig {
    /// Token descriptions, minted strictly in order.
    pub descriptions: Vec<String>,

    /// Recipient address override. Defaults to the signer's own address.
    pub recipient: Option<String>,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            descriptions: vec![
                "nft 1".to_string(),
                "nft 2".to_string(),
                "nft 3".to_string(),
            ],
            recipient: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeployerConfig::default();
        assert_eq!(config.chain.chain_id, 31337);
        assert_eq!(config.chain.confirmation_blocks, 1);
        assert_eq!(config.artifacts.contract, "MerkleNftV2");
        assert_eq!(config.mint.descriptions, ["nft 1", "nft 2", "nft 3"]);
        assert!(config.mint.recipient.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DeployerConfig = toml::from_str(
            r#"
            [chain]
            rpc_url = "https://rpc.example.org"
            chain_id = 11155111
            "#,
        )
        .unwrap();
        assert_eq!(config.chain.rpc_url, "https://rpc.example.org");
        assert_eq!(config.chain.chain_id, 11155111);
        // Untouched sections fall back to defaults
        assert_eq!(config.chain.rpc_timeout_secs, 10);
        assert_eq!(config.artifacts.dir, "artifacts");
        assert_eq!(config.mint.descriptions.len(), 3);
    }

    #[test]
    fn test_roundtrip() {
        let config = DeployerConfig::default();
        let text = toml::to_string(&config).unwrap();
        let decoded: DeployerConfig = toml::from_str(&text).unwrap();
        assert_eq!(decoded.chain.rpc_url, config.chain.rpc_url);
        assert_eq!(decoded.mint.descriptions, config.mint.descriptions);
    }
}
