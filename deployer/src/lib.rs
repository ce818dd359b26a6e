//! Orchestration of multi-contract deployments.
//!
//! A [`DeploymentPlan`] declares contracts to deploy in order, constructor
//! arguments that may reference earlier steps' deployed addresses, and
//! post-deploy wiring calls. [`execute`] validates the plan, then runs it
//! step by step against a [`NetworkClient`], accumulating a read-only
//! [`DeploymentResult`].

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod client;
pub mod errors;
pub mod executor;
pub mod plan;
pub mod result;
pub mod testing;

pub use client::{NetworkClient, NetworkError, Receipt};
pub use errors::PlanValidationError;
pub use executor::{
    execute, execute_with, CancelToken, ExecuteOptions, ProgressEvent, ProgressObserver,
};
pub use plan::{ArgSlot, ArgValue, ContractArtifact, DeploymentPlan, DeploymentStep, WiringAction};
pub use result::{DeploymentResult, FailureCause, RunStatus, StepOutcome};
