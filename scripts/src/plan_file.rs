//! Plan files: declarative JSON deployment plans naming artifacts by
//! contract name.
//!
//! A plan file carries no bytecode; artifact names are resolved against an
//! artifacts directory when the plan is prepared for execution.

use std::{fs, path::Path};

use deployer::{ArgSlot, DeploymentPlan, DeploymentStep, WiringAction};
use serde::{Deserialize, Serialize};

use crate::{artifacts::load_artifact, errors::ScriptError};

/// A deployment step as written in a plan file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    /// Unique step identifier
    pub id: String,
    /// Name of the contract artifact to deploy
    pub contract: String,
    /// Constructor argument slots
    #[serde(default)]
    pub args: Vec<ArgSlot>,
}

/// A wiring action as written in a plan file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiringSpec {
    /// The step whose deployed contract is called
    pub target: String,
    /// The method to call
    pub method: String,
    /// Method argument slots
    #[serde(default)]
    pub args: Vec<ArgSlot>,
}

/// A plan file: deployment steps plus post-deploy wiring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    /// Deployment steps in execution order
    pub steps: Vec<StepSpec>,
    /// Post-deploy wiring actions
    #[serde(default)]
    pub wiring: Vec<WiringSpec>,
}

impl PlanFile {
    /// Read a plan file from disk
    pub fn read(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::PlanParsing(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&contents).map_err(|e| ScriptError::PlanParsing(e.to_string()))
    }

    /// Resolve artifact names against `artifacts_dir`, producing an
    /// executable plan
    pub fn into_plan(self, artifacts_dir: &Path) -> Result<DeploymentPlan, ScriptError> {
        let steps = self
            .steps
            .into_iter()
            .map(|spec| {
                let contract = load_artifact(artifacts_dir, &spec.contract)?;
                Ok(DeploymentStep::new(spec.id, contract, spec.args))
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;

        let wiring = self
            .wiring
            .into_iter()
            .map(|spec| WiringAction::new(spec.target, spec.method, spec.args))
            .collect();

        Ok(DeploymentPlan { steps, wiring })
    }
}

#[cfg(test)]
mod tests {
    use deployer::ArgSlot;

    use super::PlanFile;

    /// A plan file mirroring the crowdsale migration's shape
    const PLAN: &str = r#"{
        "steps": [
            {
                "id": "token",
                "contract": "SaleChainToken",
                "args": [
                    { "literal": { "string": "Sale Chain" } },
                    { "literal": { "string": "SCH" } },
                    { "literal": { "uint": "6" } }
                ]
            },
            {
                "id": "staking",
                "contract": "SaleChainStaking",
                "args": [{ "ref": "token" }]
            }
        ],
        "wiring": [
            {
                "target": "token",
                "method": "addMinter",
                "args": [{ "ref": "staking" }]
            }
        ]
    }"#;

    #[test]
    fn test_plan_file_parses() {
        let plan: PlanFile = serde_json::from_str(PLAN).unwrap();
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[1].args, vec![ArgSlot::Ref("token".to_string())]);
        assert_eq!(plan.wiring[0].method, "addMinter");
    }

    #[test]
    fn test_missing_wiring_defaults_to_empty() {
        let plan: PlanFile = serde_json::from_str(
            r#"{ "steps": [{ "id": "token", "contract": "SaleChainToken" }] }"#,
        )
        .unwrap();
        assert!(plan.wiring.is_empty());
        assert!(plan.steps[0].args.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let plan: PlanFile = serde_json::from_str(PLAN).unwrap();
        let json = serde_json::to_string(&plan).unwrap();
        let reparsed: PlanFile = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed.steps[0].args, plan.steps[0].args);
    }
}
