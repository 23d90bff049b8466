//! NFT deployment-and-mint tooling library.

pub mod artifacts;
pub mod chain;
pub mod config;
pub mod runner;

pub use artifacts::Blueprint;
pub use chain::ChainError;
pub use config::DeployerConfig;
pub use runner::{RunReport, RunnerError};
