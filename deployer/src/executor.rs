//! Sequential execution of deployment plans.
//!
//! Steps run strictly one at a time in declared order: a later step's
//! constructor arguments may reference an earlier step's on-chain address,
//! so no call is issued before the previous one is confirmed. Each network
//! call is an irreversible external effect; the executor never retries, as a
//! blindly retried deployment could instantiate a duplicate contract.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use tracing::{info, warn};

use crate::{
    client::NetworkClient,
    errors::PlanValidationError,
    plan::{ArgSlot, ArgValue, DeploymentPlan, WiringAction},
    result::{DeploymentResult, FailureCause, RunStatus, StepOutcome},
};

/// A shared flag with which a caller may cancel a running plan.
///
/// Cancellation is cooperative: the executor checks the flag before issuing
/// each call, so an in-flight transaction settles before the run stops. An
/// already-submitted transaction is never revoked.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this token
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A progress event emitted after a step or wiring action settles
#[derive(Debug)]
pub enum ProgressEvent<'a> {
    /// A step's contract was deployed and confirmed
    StepDeployed {
        /// The step identifier
        id: &'a str,
        /// The deployed contract's address
        address: Address,
    },
    /// A step failed and the run aborted
    StepFailed {
        /// The step identifier
        id: &'a str,
        /// Why the step failed
        cause: &'a FailureCause,
    },
    /// A wiring action completed
    WiringApplied {
        /// Index of the action in the plan's wiring sequence
        index: usize,
        /// The target step identifier
        target: &'a str,
        /// The method called
        method: &'a str,
    },
    /// A wiring action failed and the run aborted
    WiringFailed {
        /// Index of the action in the plan's wiring sequence
        index: usize,
        /// The target step identifier
        target: &'a str,
        /// The method that failed
        method: &'a str,
        /// Why the action failed
        cause: &'a FailureCause,
    },
}

/// Observer invoked after each step or wiring action with its outcome.
///
/// Implementations should be cheap; the executor calls them inline between
/// network calls.
pub trait ProgressObserver {
    /// Handle a progress event
    fn on_event(&self, event: &ProgressEvent<'_>);
}

impl<F: Fn(&ProgressEvent<'_>)> ProgressObserver for F {
    fn on_event(&self, event: &ProgressEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores every event
struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_event(&self, _event: &ProgressEvent<'_>) {}
}

/// Options for a plan run
#[derive(Default)]
pub struct ExecuteOptions<'a> {
    /// Observer notified after each step or wiring action
    pub observer: Option<&'a dyn ProgressObserver>,
    /// Token with which the caller may cancel the run
    pub cancel: Option<CancelToken>,
}

/// Execute `plan` against `client` with default options
pub async fn execute<C: NetworkClient>(
    plan: &DeploymentPlan,
    client: &C,
) -> Result<DeploymentResult, PlanValidationError> {
    execute_with(plan, client, ExecuteOptions::default()).await
}

/// Execute `plan` against `client`.
///
/// The plan is validated before any network call is issued; validation
/// defects are returned as an error. Runtime failures abort the remaining
/// plan and are embedded in the returned [`DeploymentResult`], so the caller
/// always receives the progress made; confirmed deployments are final and
/// are never rolled back.
pub async fn execute_with<C: NetworkClient>(
    plan: &DeploymentPlan,
    client: &C,
    options: ExecuteOptions<'_>,
) -> Result<DeploymentResult, PlanValidationError> {
    plan.validate()?;

    let observer = options.observer.unwrap_or(&NoopObserver);
    let cancelled = || options.cancel.as_ref().is_some_and(CancelToken::is_cancelled);

    let mut records: BTreeMap<String, StepOutcome> = BTreeMap::new();
    let mut wiring_receipts = Vec::new();

    // Deployment pass
    for step in &plan.steps {
        let failure = if cancelled() {
            Some(FailureCause::Cancelled)
        } else {
            match resolve_args(&step.args, &records) {
                Err(reference) => Some(FailureCause::UnresolvedReference(reference)),
                Ok(args) => {
                    info!("deploying `{}` as step `{}`", step.contract.name, step.id);
                    match client.deploy_contract(&step.contract, &args).await {
                        Ok((address, receipt)) => {
                            info!("step `{}` deployed at {:#x}", step.id, address);
                            records.insert(step.id.clone(), StepOutcome::Deployed { address, receipt });
                            observer.on_event(&ProgressEvent::StepDeployed {
                                id: &step.id,
                                address,
                            });
                            None
                        }
                        Err(err) => Some(FailureCause::Network(err)),
                    }
                }
            }
        };

        if let Some(cause) = failure {
            warn!("step `{}` failed: {}", step.id, cause);
            observer.on_event(&ProgressEvent::StepFailed {
                id: &step.id,
                cause: &cause,
            });
            records.insert(
                step.id.clone(),
                StepOutcome::Failed {
                    cause: cause.clone(),
                },
            );
            let status = RunStatus::FailedAtStep {
                id: step.id.clone(),
                cause,
            };
            return Ok(DeploymentResult::new(records, wiring_receipts, status));
        }
    }

    // Wiring pass; every step is deployed, so all references resolve
    for (index, action) in plan.wiring.iter().enumerate() {
        let failure = if cancelled() {
            Some(FailureCause::Cancelled)
        } else {
            match resolve_wiring(plan, action, &records) {
                Err(reference) => Some(FailureCause::UnresolvedReference(reference)),
                Ok((address, abi, args)) => {
                    info!("wiring `{}` on step `{}`", action.method, action.target);
                    match client.call_method(address, abi, &action.method, &args).await {
                        Ok(receipt) => {
                            wiring_receipts.push(receipt);
                            observer.on_event(&ProgressEvent::WiringApplied {
                                index,
                                target: &action.target,
                                method: &action.method,
                            });
                            None
                        }
                        Err(err) => Some(FailureCause::Network(err)),
                    }
                }
            }
        };

        if let Some(cause) = failure {
            warn!(
                "wiring `{}` on step `{}` failed: {}",
                action.method, action.target, cause
            );
            observer.on_event(&ProgressEvent::WiringFailed {
                index,
                target: &action.target,
                method: &action.method,
                cause: &cause,
            });
            let status = RunStatus::FailedAtWiring {
                index,
                method: action.method.clone(),
                cause,
            };
            return Ok(DeploymentResult::new(records, wiring_receipts, status));
        }
    }

    Ok(DeploymentResult::new(
        records,
        wiring_receipts,
        RunStatus::Succeeded,
    ))
}

/// Resolve argument slots against the outcomes recorded so far.
///
/// Returns the unresolvable reference on failure; plans that passed
/// validation never hit this.
fn resolve_args(
    slots: &[ArgSlot],
    records: &BTreeMap<String, StepOutcome>,
) -> Result<Vec<ArgValue>, String> {
    slots
        .iter()
        .map(|slot| match slot {
            ArgSlot::Literal(value) => Ok(value.clone()),
            ArgSlot::Ref(id) => records
                .get(id)
                .and_then(StepOutcome::address)
                .map(ArgValue::Address)
                .ok_or_else(|| id.clone()),
        })
        .collect()
}

/// Resolve a wiring action to its target address, target ABI, and arguments
fn resolve_wiring<'a>(
    plan: &'a DeploymentPlan,
    action: &WiringAction,
    records: &BTreeMap<String, StepOutcome>,
) -> Result<(Address, &'a JsonAbi, Vec<ArgValue>), String> {
    let address = records
        .get(&action.target)
        .and_then(StepOutcome::address)
        .ok_or_else(|| action.target.clone())?;
    let abi = plan
        .steps
        .iter()
        .find(|step| step.id == action.target)
        .map(|step| &step.contract.abi)
        .ok_or_else(|| action.target.clone())?;
    let args = resolve_args(&action.args, records)?;
    Ok((address, abi, args))
}
