//! The accumulated outcome of a plan run

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use alloy_primitives::Address;
use serde::Serialize;

use crate::client::{NetworkError, Receipt};

/// The cause of a failed step or wiring action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FailureCause {
    /// The network reported an error for the call
    Network(NetworkError),
    /// An argument reference could not be resolved at execution time.
    ///
    /// Unreachable for plans that passed validation; recorded rather than
    /// panicked on so that a defect surfaces as a failed run.
    UnresolvedReference(String),
    /// The run was cancelled before the call was issued
    Cancelled,
}

impl Display for FailureCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Network(e) => write!(f, "{}", e),
            FailureCause::UnresolvedReference(reference) => {
                write!(f, "unresolved reference `{}` at execution time", reference)
            }
            FailureCause::Cancelled => write!(f, "run cancelled before the call was issued"),
        }
    }
}

/// The outcome of a single deployment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// The contract was deployed and confirmed
    Deployed {
        /// The deployed contract's address
        address: Address,
        /// The deployment transaction receipt
        receipt: Receipt,
    },
    /// The deployment failed
    Failed {
        /// Why the deployment failed
        cause: FailureCause,
    },
}

impl StepOutcome {
    /// The deployed address, if the step succeeded
    pub fn address(&self) -> Option<Address> {
        match self {
            StepOutcome::Deployed { address, .. } => Some(*address),
            StepOutcome::Failed { .. } => None,
        }
    }
}

/// The terminal status of a plan run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Every step and wiring action completed
    Succeeded,
    /// The run aborted at the named step; earlier steps' results are
    /// retained, later steps were never issued
    FailedAtStep {
        /// The failed step's identifier
        id: String,
        /// Why the step failed
        cause: FailureCause,
    },
    /// All steps deployed, but the run aborted at the indexed wiring action
    FailedAtWiring {
        /// Index of the failed action in the plan's wiring sequence
        index: usize,
        /// The failed action's method name
        method: String,
        /// Why the action failed
        cause: FailureCause,
    },
}

/// Read-only record of a plan run: per-step outcomes, wiring receipts, and
/// the terminal status.
///
/// Populated step by step by the executor's sequential loop and handed to
/// the caller only once the run reaches a terminal state; deployments
/// already confirmed on chain are never rolled back, so a failed result
/// still carries every earlier step's record.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentResult {
    /// Outcome of every step reached, keyed by step identifier
    records: BTreeMap<String, StepOutcome>,
    /// Receipts of wiring actions that completed, in declared order
    wiring_receipts: Vec<Receipt>,
    /// Terminal status of the run
    status: RunStatus,
}

impl DeploymentResult {
    /// Assemble a terminal result; only the executor constructs these
    pub(crate) fn new(
        records: BTreeMap<String, StepOutcome>,
        wiring_receipts: Vec<Receipt>,
        status: RunStatus,
    ) -> Self {
        Self {
            records,
            wiring_receipts,
            status,
        }
    }

    /// The terminal status of the run
    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    /// Whether every step and wiring action completed
    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Succeeded
    }

    /// The outcome recorded for `id`, if the run reached that step
    pub fn step(&self, id: &str) -> Option<&StepOutcome> {
        self.records.get(id)
    }

    /// The deployed address recorded for `id`
    pub fn address_of(&self, id: &str) -> Option<Address> {
        self.records.get(id).and_then(StepOutcome::address)
    }

    /// All step outcomes, keyed by step identifier
    pub fn step_outcomes(&self) -> &BTreeMap<String, StepOutcome> {
        &self.records
    }

    /// Successfully deployed steps and their addresses
    pub fn deployed_addresses(&self) -> impl Iterator<Item = (&str, Address)> {
        self.records
            .iter()
            .filter_map(|(id, outcome)| outcome.address().map(|address| (id.as_str(), address)))
    }

    /// Receipts of the wiring actions that completed, in declared order
    pub fn wiring_receipts(&self) -> &[Receipt] {
        &self.wiring_receipts
    }
}
