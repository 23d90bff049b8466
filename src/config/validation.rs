//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, sane gas settings)
//! - Check addresses parse before any transaction is built
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: DeployerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;

use crate::config::schema::DeployerConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &DeployerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.rpc_url.trim().is_empty() {
        errors.push(err("chain.rpc_url", "must not be empty"));
    } else if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(err("chain.rpc_url", "is not a valid URL"));
    }
    if config.chain.chain_id == 0 {
        errors.push(err("chain.chain_id", "must be non-zero"));
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(err("chain.rpc_timeout_secs", "must be greater than zero"));
    }
    if config.chain.confirmation_timeout_secs == 0 {
        errors.push(err(
            "chain.confirmation_timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.chain.gas_price_multiplier <= 0.0 {
        errors.push(err("chain.gas_price_multiplier", "must be positive"));
    }

    if config.artifacts.contract.trim().is_empty() {
        errors.push(err("artifacts.contract", "must not be empty"));
    }

    if config.mint.descriptions.is_empty() {
        errors.push(err("mint.descriptions", "must list at least one token"));
    }
    if let Some(recipient) = &config.mint.recipient {
        if recipient.parse::<Address>().is_err() {
            errors.push(err("mint.recipient", "is not a valid address"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DeployerConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_empty_rpc_url() {
        let mut config = DeployerConfig::default();
        config.chain.rpc_url = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "chain.rpc_url"));
    }

    #[test]
    fn test_rejects_bad_recipient() {
        let mut config = DeployerConfig::default();
        config.mint.recipient = Some("not-an-address".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "mint.recipient"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DeployerConfig::default();
        config.chain.chain_id = 0;
        config.chain.gas_price_multiplier = 0.0;
        config.mint.descriptions.clear();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
