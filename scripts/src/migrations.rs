//! The crowdsale suite migration: token, staking, crowdsale, minter wiring.
//!
//! Wallet addresses and the sale rate are deployment configuration, not
//! constants; each target environment supplies its own [`CrowdsaleConfig`].

use std::{fs, path::Path};

use alloy_primitives::{Address, U256};
use deployer::{ArgSlot, ArgValue, ContractArtifact, DeploymentPlan, DeploymentStep, WiringAction};
use serde::{Deserialize, Serialize};

use crate::{
    artifacts::load_artifact,
    constants::{
        ADD_MINTER_METHOD, CROWDSALE_CONTRACT_NAME, CROWDSALE_STEP_ID, STAKING_CONTRACT_NAME,
        STAKING_STEP_ID, TOKEN_CONTRACT_NAME, TOKEN_STEP_ID,
    },
    errors::ScriptError,
};

/// Configuration of a crowdsale suite deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdsaleConfig {
    /// Token display name
    pub token_name: String,
    /// Token ticker symbol
    pub token_symbol: String,
    /// Token decimal places
    pub token_decimals: u8,
    /// Initial token supply, in base units
    pub token_supply: U256,
    /// Tokens issued per unit of payment currency
    pub rate: u64,
    /// Wallet receiving raised funds
    pub fund_wallet: Address,
    /// Wallet holding the token allocation for sale
    pub token_wallet: Address,
    /// Wallet funding staking rewards
    pub staking_fund_wallet: Address,
    /// Wallet for level-2 distribution
    pub level2_wallet: Address,
}

impl CrowdsaleConfig {
    /// Read a config from a JSON file
    pub fn read(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::PlanParsing(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&contents).map_err(|e| ScriptError::PlanParsing(e.to_string()))
    }
}

/// Artifacts of the three crowdsale suite contracts
pub struct CrowdsaleArtifacts {
    /// The token contract
    pub token: ContractArtifact,
    /// The staking contract
    pub staking: ContractArtifact,
    /// The crowdsale contract
    pub crowdsale: ContractArtifact,
}

impl CrowdsaleArtifacts {
    /// Load the three artifacts from `artifacts_dir` by their contract names
    pub fn load(artifacts_dir: &Path) -> Result<Self, ScriptError> {
        Ok(Self {
            token: load_artifact(artifacts_dir, TOKEN_CONTRACT_NAME)?,
            staking: load_artifact(artifacts_dir, STAKING_CONTRACT_NAME)?,
            crowdsale: load_artifact(artifacts_dir, CROWDSALE_CONTRACT_NAME)?,
        })
    }
}

/// Build the crowdsale deployment plan.
///
/// The token deploys first; staking takes the token's address; the crowdsale
/// takes the rate, the four wallets, and the token's address twice (the
/// payment token and the staked token are the same contract). Finally the
/// crowdsale is granted the minter role on the token.
pub fn crowdsale_plan(config: &CrowdsaleConfig, artifacts: CrowdsaleArtifacts) -> DeploymentPlan {
    let token = DeploymentStep::new(
        TOKEN_STEP_ID,
        artifacts.token,
        vec![
            ArgSlot::Literal(ArgValue::String(config.token_name.clone())),
            ArgSlot::Literal(ArgValue::String(config.token_symbol.clone())),
            ArgSlot::Literal(ArgValue::Uint(U256::from(config.token_decimals))),
            ArgSlot::Literal(ArgValue::Uint(config.token_supply)),
        ],
    );

    let staking = DeploymentStep::new(
        STAKING_STEP_ID,
        artifacts.staking,
        vec![ArgSlot::Ref(TOKEN_STEP_ID.to_string())],
    );

    let crowdsale = DeploymentStep::new(
        CROWDSALE_STEP_ID,
        artifacts.crowdsale,
        vec![
            ArgSlot::Literal(ArgValue::Uint(U256::from(config.rate))),
            ArgSlot::Literal(ArgValue::Address(config.fund_wallet)),
            ArgSlot::Literal(ArgValue::Address(config.token_wallet)),
            ArgSlot::Literal(ArgValue::Address(config.staking_fund_wallet)),
            ArgSlot::Literal(ArgValue::Address(config.level2_wallet)),
            ArgSlot::Ref(TOKEN_STEP_ID.to_string()),
            ArgSlot::Ref(TOKEN_STEP_ID.to_string()),
        ],
    );

    let wiring = vec![WiringAction::new(
        TOKEN_STEP_ID,
        ADD_MINTER_METHOD,
        vec![ArgSlot::Ref(CROWDSALE_STEP_ID.to_string())],
    )];

    DeploymentPlan {
        steps: vec![token, staking, crowdsale],
        wiring,
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};
    use deployer::{testing::test_artifact, ArgSlot};

    use crate::constants::{CROWDSALE_STEP_ID, STAKING_STEP_ID, TOKEN_STEP_ID};

    use super::{crowdsale_plan, CrowdsaleArtifacts, CrowdsaleConfig};

    /// A config with distinct wallet addresses
    fn config() -> CrowdsaleConfig {
        CrowdsaleConfig {
            token_name: "Sale Chain".to_string(),
            token_symbol: "SCH".to_string(),
            token_decimals: 6,
            token_supply: U256::from(1_000_000_000_000_000u64),
            rate: 10,
            fund_wallet: Address::repeat_byte(0x01),
            token_wallet: Address::repeat_byte(0x02),
            staking_fund_wallet: Address::repeat_byte(0x03),
            level2_wallet: Address::repeat_byte(0x04),
        }
    }

    /// Placeholder artifacts for plan-shape tests
    fn artifacts() -> CrowdsaleArtifacts {
        CrowdsaleArtifacts {
            token: test_artifact("SaleChainToken"),
            staking: test_artifact("SaleChainStaking"),
            crowdsale: test_artifact("SaleChainCrowdsale"),
        }
    }

    #[test]
    fn test_crowdsale_plan_is_valid() {
        let plan = crowdsale_plan(&config(), artifacts());
        plan.validate().unwrap();
    }

    #[test]
    fn test_crowdsale_plan_ordering() {
        let plan = crowdsale_plan(&config(), artifacts());
        let ids: Vec<&str> = plan.steps.iter().map(|step| step.id.as_str()).collect();
        assert_eq!(ids, vec![TOKEN_STEP_ID, STAKING_STEP_ID, CROWDSALE_STEP_ID]);
    }

    #[test]
    fn test_crowdsale_references_token_twice() {
        let plan = crowdsale_plan(&config(), artifacts());
        let token_refs = plan.steps[2]
            .args
            .iter()
            .filter(|slot| matches!(slot, ArgSlot::Ref(id) if id == TOKEN_STEP_ID))
            .count();
        assert_eq!(token_refs, 2);
    }

    #[test]
    fn test_minter_wiring_targets_token() {
        let plan = crowdsale_plan(&config(), artifacts());
        assert_eq!(plan.wiring.len(), 1);
        assert_eq!(plan.wiring[0].target, TOKEN_STEP_ID);
        assert_eq!(
            plan.wiring[0].args,
            vec![ArgSlot::Ref(CROWDSALE_STEP_ID.to_string())]
        );
    }

    #[test]
    fn test_config_round_trip() {
        let config = config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CrowdsaleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.token_supply, config.token_supply);
        assert_eq!(parsed.fund_wallet, config.fund_wallet);
    }
}
