//! Reading and writing the `deployments.json` address book

use std::{fs, path::Path, str::FromStr};

use alloy_primitives::Address;
use deployer::DeploymentResult;
use serde_json::{json, Value};

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// Record each successfully deployed step's address under its step id.
///
/// Creates the file if missing; entries for other keys are kept, so repeated
/// runs accumulate into one address book.
pub fn write_deployed_addresses(
    file_path: &Path,
    result: &DeploymentResult,
) -> Result<(), ScriptError> {
    let mut root = if file_path.exists() {
        read_deployments_file(file_path)?
    } else {
        json!({})
    };

    let deployments = root
        .as_object_mut()
        .ok_or_else(|| {
            ScriptError::ReadDeployments("deployments file is not a JSON object".to_string())
        })?
        .entry(DEPLOYMENTS_KEY.to_string())
        .or_insert_with(|| json!({}));
    let entries = deployments.as_object_mut().ok_or_else(|| {
        ScriptError::ReadDeployments("deployments entry is not a JSON object".to_string())
    })?;

    for (id, address) in result.deployed_addresses() {
        entries.insert(id.to_string(), Value::String(format!("{:#x}", address)));
    }

    let rendered = serde_json::to_string_pretty(&root)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, rendered).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}

/// Read the recorded address for `key` from the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &Path,
    key: &str,
) -> Result<Address, ScriptError> {
    let root = read_deployments_file(file_path)?;

    let addr_str = root[DEPLOYMENTS_KEY][key].as_str().ok_or_else(|| {
        ScriptError::ReadDeployments(format!(
            "could not parse address for `{}` from deployments file",
            key
        ))
    })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Parse the deployments file as JSON
fn read_deployments_file(file_path: &Path) -> Result<Value, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", file_path.display(), e)))?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf};

    use deployer::{
        execute,
        testing::{test_artifact, MockNetworkClient},
        DeploymentPlan, DeploymentStep,
    };

    use super::{parse_addr_from_deployments_file, write_deployed_addresses};

    /// A scratch file path unique to this test
    fn scratch_file(test: &str) -> PathBuf {
        env::temp_dir().join(format!("deployments-{}-{}.json", test, std::process::id()))
    }

    #[tokio::test]
    async fn test_write_then_read_addresses() -> eyre::Result<()> {
        let plan = DeploymentPlan {
            steps: vec![
                DeploymentStep::new("token", test_artifact("Token"), vec![]),
                DeploymentStep::new("staking", test_artifact("Staking"), vec![]),
            ],
            wiring: vec![],
        };
        let client = MockNetworkClient::new();
        let result = execute(&plan, &client).await?;

        let path = scratch_file("round-trip");
        write_deployed_addresses(&path, &result)?;

        let token = parse_addr_from_deployments_file(&path, "token")?;
        assert_eq!(Some(token), result.address_of("token"));
        let staking = parse_addr_from_deployments_file(&path, "staking")?;
        assert_eq!(Some(staking), result.address_of("staking"));

        fs::remove_file(&path).ok();
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_key_is_an_error() -> eyre::Result<()> {
        let plan = DeploymentPlan {
            steps: vec![DeploymentStep::new("token", test_artifact("Token"), vec![])],
            wiring: vec![],
        };
        let client = MockNetworkClient::new();
        let result = execute(&plan, &client).await?;

        let path = scratch_file("missing-key");
        write_deployed_addresses(&path, &result)?;
        assert!(parse_addr_from_deployments_file(&path, "crowdsale").is_err());

        fs::remove_file(&path).ok();
        Ok(())
    }
}
