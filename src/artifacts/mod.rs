//! Compiled contract artifact resolution.
//!
//! # Responsibilities
//! - Locate artifact JSON files by contract name
//! - Decode ABI and deployment bytecode
//! - Reject blueprints whose compilation output is absent
//!
//! Artifact files follow the common build-tool layout: a JSON document with
//! `contractName`, `abi`, and hex-encoded `bytecode` fields, nested anywhere
//! under the configured artifacts directory (build tools typically emit
//! `contracts/<File>.sol/<Name>.json`).

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while resolving a blueprint.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// No artifact file matched the requested contract name.
    #[error("No artifact named '{name}' under {dir}")]
    NotFound { name: String, dir: PathBuf },

    /// The artifact exists but carries no deployable bytecode.
    #[error("Artifact '{0}' has no deployable bytecode; was the contract compiled?")]
    NotCompiled(String),

    /// The artifact bytecode field is not valid hex.
    #[error("Artifact '{name}' bytecode is not valid hex: {reason}")]
    InvalidBytecode { name: String, reason: String },

    /// Artifact file could not be read.
    #[error("Artifact read error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact file could not be parsed.
    #[error("Artifact parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A named, deployable contract blueprint.
#[derive(Debug, Clone)]
pub struct Blueprint {
    /// Contract name the blueprint was resolved under.
    pub name: String,
    /// Deployment bytecode (constructor + runtime code).
    pub bytecode: Bytes,
    /// Contract ABI as raw JSON.
    pub abi: serde_json::Value,
}

#[derive(Deserialize)]
struct ArtifactFile {
    #[serde(rename = "contractName")]
    contract_name: Option<String>,
    #[serde(default)]
    abi: serde_json::Value,
    #[serde(default)]
    bytecode: String,
}

/// Resolve a contract blueprint by name from the artifacts directory.
pub fn resolve(dir: &Path, name: &str) -> Result<Blueprint, ArtifactError> {
    if !dir.is_dir() {
        return Err(ArtifactError::NotFound {
            name: name.to_string(),
            dir: dir.to_path_buf(),
        });
    }

    let path = find_artifact(dir, name)?.ok_or_else(|| ArtifactError::NotFound {
        name: name.to_string(),
        dir: dir.to_path_buf(),
    })?;

    let raw = fs::read_to_string(&path)?;
    let artifact: ArtifactFile = serde_json::from_str(&raw)?;

    let hex = artifact.bytecode.trim();
    if hex.is_empty() || hex == "0x" {
        return Err(ArtifactError::NotCompiled(name.to_string()));
    }
    let bytecode: Bytes = hex.parse().map_err(|e| ArtifactError::InvalidBytecode {
        name: name.to_string(),
        reason: format!("{e}"),
    })?;

    Ok(Blueprint {
        name: artifact.contract_name.unwrap_or_else(|| name.to_string()),
        bytecode,
        abi: artifact.abi,
    })
}

/// Breadth-first search for `<name>.json` under `dir`.
///
/// Directory entries are visited in sorted order, level by level, so
/// resolution is deterministic when duplicate artifact names exist: the
/// shallowest match wins, lexicographically within a level.
fn find_artifact(dir: &Path, name: &str) -> Result<Option<PathBuf>, ArtifactError> {
    let target = format!("{name}.json");
    let mut queue = VecDeque::from([dir.to_path_buf()]);

    while let Some(current) = queue.pop_front() {
        let mut entries = fs::read_dir(&current)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();

        for path in entries {
            if path.is_dir() {
                queue.push_back(path);
            } else if path.file_name() == Some(OsStr::new(&target)) {
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}
