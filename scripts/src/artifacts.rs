//! Loading compiled contract artifacts from disk.
//!
//! An artifact is the compiler's JSON output for one contract, of which only
//! the `abi` and `bytecode` fields are read.

use std::{fs, path::Path};

use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;
use deployer::ContractArtifact;
use serde::Deserialize;

use crate::{constants::ARTIFACT_EXTENSION, errors::ScriptError};

/// The on-disk artifact fields read by the scripts
#[derive(Deserialize)]
struct RawArtifact {
    /// The contract ABI
    abi: JsonAbi,
    /// Hex-encoded creation bytecode, with or without a `0x` prefix
    bytecode: String,
}

/// Load the artifact for `name` from `<dir>/<name>.json`
pub fn load_artifact(dir: &Path, name: &str) -> Result<ContractArtifact, ScriptError> {
    let path = dir.join(format!("{}.{}", name, ARTIFACT_EXTENSION));
    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", path.display(), e)))?;

    parse_artifact(name, &contents)
}

/// Parse an artifact from its JSON contents
pub fn parse_artifact(name: &str, contents: &str) -> Result<ContractArtifact, ScriptError> {
    let raw: RawArtifact =
        serde_json::from_str(contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    let bytecode = decode_bytecode(&raw.bytecode)?;

    Ok(ContractArtifact {
        name: name.to_string(),
        abi: raw.abi,
        bytecode,
    })
}

/// Decode hex bytecode, tolerating a `0x` prefix
fn decode_bytecode(bytecode: &str) -> Result<Bytes, ScriptError> {
    let stripped = bytecode.strip_prefix("0x").unwrap_or(bytecode);
    let bytes =
        hex::decode(stripped).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    Ok(Bytes::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::parse_artifact;

    /// A minimal token artifact with a constructor and one method
    const TOKEN_ARTIFACT: &str = r#"{
        "abi": [
            {
                "type": "constructor",
                "inputs": [
                    { "name": "name", "type": "string" },
                    { "name": "symbol", "type": "string" }
                ],
                "stateMutability": "nonpayable"
            },
            {
                "type": "function",
                "name": "addMinter",
                "inputs": [{ "name": "account", "type": "address" }],
                "outputs": [],
                "stateMutability": "nonpayable"
            }
        ],
        "bytecode": "0x608060405234801561001057600080fd5b50"
    }"#;

    #[test]
    fn test_parse_artifact() {
        let artifact = parse_artifact("SaleChainToken", TOKEN_ARTIFACT).unwrap();
        assert_eq!(artifact.name, "SaleChainToken");
        assert!(artifact.abi.constructor.is_some());
        assert!(artifact.abi.functions.contains_key("addMinter"));
        assert_eq!(artifact.bytecode[..4], [0x60, 0x80, 0x60, 0x40]);
    }

    #[test]
    fn test_unprefixed_bytecode_accepted() {
        let contents = TOKEN_ARTIFACT.replace("0x6080", "6080");
        let artifact = parse_artifact("SaleChainToken", &contents).unwrap();
        assert_eq!(artifact.bytecode[..2], [0x60, 0x80]);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse_artifact("SaleChainToken", "{ \"abi\": [").is_err());
    }

    #[test]
    fn test_malformed_bytecode_rejected() {
        let contents = TOKEN_ARTIFACT.replace("0x6080", "0xzz80");
        assert!(parse_artifact("SaleChainToken", &contents).is_err());
    }
}
