use std::{fs, path::Path};

use alloy_json_abi::JsonAbi;
use serde::Deserialize;

use crate::types::Bytes;

/// Compiled contract as written by the build step, only `abi` and `bytecode` are read
#[derive(Deserialize, Clone, Debug)]
pub struct ContractArtifact {
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn load<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read(path).map_err(|e| eyre::eyre!("{e}:{}", path.to_string_lossy()))?;
        let artifact = Self::from_slice(&content)
            .map_err(|e| eyre::eyre!("{e}:{}", path.to_string_lossy()))?;
        log::debug!(
            "loaded artifact {} ({} abi items, {} bytes of code)",
            path.display(),
            artifact.abi.len(),
            artifact.bytecode.len()
        );
        Ok(artifact)
    }

    pub fn from_slice(content: &[u8]) -> eyre::Result<Self> {
        let artifact: ContractArtifact = serde_json::from_slice(content)?;
        if artifact.bytecode.is_empty() {
            return Err(eyre::eyre!(
                "empty bytecode, abstract contracts and interfaces cannot be deployed"
            ));
        }
        Ok(artifact)
    }
}
