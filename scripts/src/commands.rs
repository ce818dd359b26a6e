//! Implementations of the deploy subcommands

use std::path::Path;

use deployer::{
    execute_with, DeploymentPlan, DeploymentResult, ExecuteOptions, NetworkClient, ProgressEvent,
    RunStatus,
};
use itertools::Itertools;

use crate::{
    cli::{CheckArgs, MigrateArgs, RunArgs},
    deployments::write_deployed_addresses,
    errors::ScriptError,
    migrations::{crowdsale_plan, CrowdsaleArtifacts, CrowdsaleConfig},
    plan_file::PlanFile,
};

/// Execute a plan file against the network
pub async fn run_plan<C: NetworkClient>(
    args: RunArgs,
    client: &C,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let plan = PlanFile::read(&args.plan)?.into_plan(&args.artifacts_dir)?;

    run_and_record(&plan, client, deployments_path).await
}

/// Validate a plan file without touching the network
pub fn check_plan(args: CheckArgs) -> Result<(), ScriptError> {
    let plan = PlanFile::read(&args.plan)?.into_plan(&args.artifacts_dir)?;
    plan.validate()?;

    println!("plan `{}` is valid: {}", args.plan.display(), describe_plan(&plan));

    Ok(())
}

/// Deploy the crowdsale suite from a config file
pub async fn migrate<C: NetworkClient>(
    args: MigrateArgs,
    client: &C,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let config = CrowdsaleConfig::read(&args.config)?;
    let artifacts = CrowdsaleArtifacts::load(&args.artifacts_dir)?;
    let plan = crowdsale_plan(&config, artifacts);

    run_and_record(&plan, client, deployments_path).await
}

/// Execute the plan, record the addresses it deployed, and surface any
/// failure.
///
/// Addresses are recorded even for a failed run: the deployments that did
/// confirm are already final on chain.
async fn run_and_record<C: NetworkClient>(
    plan: &DeploymentPlan,
    client: &C,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let observer = |event: &ProgressEvent<'_>| match event {
        ProgressEvent::StepDeployed { id, address } => {
            println!("step `{}` deployed at {:#x}", id, address);
        }
        ProgressEvent::StepFailed { id, cause } => {
            println!("step `{}` failed: {}", id, cause);
        }
        ProgressEvent::WiringApplied { target, method, .. } => {
            println!("wired `{}` on `{}`", method, target);
        }
        ProgressEvent::WiringFailed {
            target,
            method,
            cause,
            ..
        } => {
            println!("wiring `{}` on `{}` failed: {}", method, target, cause);
        }
    };

    let options = ExecuteOptions {
        observer: Some(&observer),
        cancel: None,
    };
    let result = execute_with(plan, client, options).await?;

    write_deployed_addresses(deployments_path, &result)?;

    report_status(&result)
}

/// Translate a terminal run status into the script's exit condition
fn report_status(result: &DeploymentResult) -> Result<(), ScriptError> {
    match result.status() {
        RunStatus::Succeeded => Ok(()),
        RunStatus::FailedAtStep { id, cause } => Err(ScriptError::RunFailed(format!(
            "deployment step `{}` failed: {}",
            id, cause
        ))),
        RunStatus::FailedAtWiring {
            index,
            method,
            cause,
        } => Err(ScriptError::RunFailed(format!(
            "wiring action {} (`{}`) failed: {}",
            index, method, cause
        ))),
    }
}

/// One-line summary of a plan's steps and wiring, for logs
fn describe_plan(plan: &DeploymentPlan) -> String {
    let steps = plan.steps.iter().map(|step| step.id.as_str()).join(" -> ");

    format!(
        "{} steps ({}), {} wiring actions",
        plan.steps.len(),
        steps,
        plan.wiring.len()
    )
}
