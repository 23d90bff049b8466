//! On-chain access subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)
//!     → signer.rs (key loading)
//!     → client.rs (RPC connection with timeouts, local signing)
//!     → tx.rs (build, submit, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod signer;
pub mod tx;
pub mod types;

pub use client::RpcClient;
pub use signer::DeployerSigner;
pub use tx::TxPipeline;
pub use types::{ChainConfig, ChainError, ChainId};
