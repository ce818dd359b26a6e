//! The declarative deployment plan: steps, argument slots, and wiring actions

use std::collections::HashSet;

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::errors::PlanValidationError;

/// A compiled contract: its name, ABI, and creation bytecode.
///
/// How artifacts are produced is external to the orchestrator; the `scripts`
/// crate loads them from compiler output on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractArtifact {
    /// Human-readable contract name, used in logs and call records
    pub name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The contract creation bytecode
    pub bytecode: Bytes,
}

/// A literal argument value passed to a constructor or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgValue {
    /// An account or contract address
    Address(Address),
    /// An unsigned 256-bit integer
    Uint(U256),
    /// A boolean
    Bool(bool),
    /// A UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Bytes),
}

/// A single constructor or method argument slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgSlot {
    /// A literal value passed through unchanged
    Literal(ArgValue),
    /// The deployed address of the named step
    Ref(String),
}

/// A single contract deployment within a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentStep {
    /// Identifier of this step, unique within the plan
    pub id: String,
    /// The contract to deploy
    pub contract: ContractArtifact,
    /// Constructor argument slots, in ABI order
    pub args: Vec<ArgSlot>,
}

impl DeploymentStep {
    /// Construct a deployment step
    pub fn new(id: impl Into<String>, contract: ContractArtifact, args: Vec<ArgSlot>) -> Self {
        Self {
            id: id.into(),
            contract,
            args,
        }
    }
}

/// A post-deploy call wiring already-deployed contracts together, e.g.
/// granting a role to another step's deployed address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiringAction {
    /// The step whose deployed contract is called
    pub target: String,
    /// The method to call
    pub method: String,
    /// Method argument slots, in ABI order
    pub args: Vec<ArgSlot>,
}

impl WiringAction {
    /// Construct a wiring action
    pub fn new(target: impl Into<String>, method: impl Into<String>, args: Vec<ArgSlot>) -> Self {
        Self {
            target: target.into(),
            method: method.into(),
            args,
        }
    }
}

/// An ordered sequence of deployment steps followed by wiring actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentPlan {
    /// Deployment steps, executed in declared order
    pub steps: Vec<DeploymentStep>,
    /// Wiring actions, executed in declared order after all steps succeed
    pub wiring: Vec<WiringAction>,
}

impl DeploymentPlan {
    /// Statically validate the plan.
    ///
    /// Checks that the plan is non-empty, step identifiers are unique, step
    /// arguments reference only strictly earlier steps, and wiring actions
    /// reference only declared steps. [`crate::execute`] runs this before
    /// issuing any network call.
    pub fn validate(&self) -> Result<(), PlanValidationError> {
        if self.steps.is_empty() {
            return Err(PlanValidationError::EmptyPlan);
        }

        // Ids of the steps declared before the one being checked
        let mut earlier: HashSet<&str> = HashSet::new();
        for step in &self.steps {
            for reference in step.args.iter().filter_map(ArgSlot::reference) {
                if !earlier.contains(reference) {
                    return Err(if self.declares(reference) {
                        PlanValidationError::ForwardReference {
                            step: step.id.clone(),
                            reference: reference.to_string(),
                        }
                    } else {
                        PlanValidationError::UnknownReference {
                            step: step.id.clone(),
                            reference: reference.to_string(),
                        }
                    });
                }
            }

            if !earlier.insert(&step.id) {
                return Err(PlanValidationError::DuplicateStepId {
                    id: step.id.clone(),
                });
            }
        }

        // Wiring runs after every step, so any declared step is a valid
        // reference here
        for action in &self.wiring {
            if !self.declares(&action.target) {
                return Err(PlanValidationError::UnknownWiringTarget {
                    method: action.method.clone(),
                    target: action.target.clone(),
                });
            }

            for reference in action.args.iter().filter_map(ArgSlot::reference) {
                if !self.declares(reference) {
                    return Err(PlanValidationError::UnknownWiringReference {
                        method: action.method.clone(),
                        reference: reference.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Whether the plan declares a step with the given identifier
    fn declares(&self, id: &str) -> bool {
        self.steps.iter().any(|step| step.id == id)
    }
}

impl ArgSlot {
    /// The referenced step identifier, if this slot is a reference
    fn reference(&self) -> Option<&str> {
        match self {
            ArgSlot::Literal(_) => None,
            ArgSlot::Ref(id) => Some(id),
        }
    }
}
