//! Utilities for running integration tests

use std::path::PathBuf;

use alloy::providers::Provider;
use alloy_primitives::Address;
use deployer::{execute, DeploymentResult};
use eyre::{eyre, Result};
use scripts::{
    client::RpcClient,
    migrations::{crowdsale_plan, CrowdsaleArtifacts, CrowdsaleConfig},
};

/// The arguments provided to each integration test
pub(crate) struct TestArgs<P> {
    /// The client used to run deployment plans
    pub(crate) client: RpcClient<P>,
    /// The crowdsale deployment config
    pub(crate) config: CrowdsaleConfig,
    /// Directory containing compiled contract artifacts
    pub(crate) artifacts_dir: PathBuf,
}

/// Run the crowdsale migration plan against the devnet
pub(crate) async fn run_crowdsale_plan<P: Provider>(
    args: &TestArgs<P>,
) -> Result<DeploymentResult> {
    let artifacts = CrowdsaleArtifacts::load(&args.artifacts_dir)?;
    let plan = crowdsale_plan(&args.config, artifacts);

    Ok(execute(&plan, &args.client).await?)
}

/// The address recorded for `id`, or an error naming the missing step
pub(crate) fn deployed_address(result: &DeploymentResult, id: &str) -> Result<Address> {
    result
        .address_of(id)
        .ok_or_else(|| eyre!("no recorded address for step `{}`", id))
}
