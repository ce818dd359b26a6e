//! Integration tests for the crowdsale deployment flow

use alloy::providers::Provider;
use alloy_primitives::U256;
use deployer::{execute, FailureCause, RunStatus, StepOutcome};
use eyre::Result;
use scripts::{
    constants::{CROWDSALE_STEP_ID, STAKING_STEP_ID, TOKEN_STEP_ID},
    migrations::{crowdsale_plan, CrowdsaleArtifacts},
};

use crate::{
    abis::{SaleChainStaking, SaleChainToken},
    utils::{deployed_address, run_crowdsale_plan, TestArgs},
};

/// Deploy the full suite and check the minter wiring took effect on chain
pub(crate) async fn test_crowdsale_suite<P: Provider + Clone>(args: &TestArgs<P>) -> Result<()> {
    let result = run_crowdsale_plan(args).await?;
    assert!(
        result.succeeded(),
        "migration did not succeed: {:?}",
        result.status()
    );

    let token_address = deployed_address(&result, TOKEN_STEP_ID)?;
    deployed_address(&result, STAKING_STEP_ID)?;
    let crowdsale_address = deployed_address(&result, CROWDSALE_STEP_ID)?;
    assert_eq!(result.wiring_receipts().len(), 1);

    let token = SaleChainToken::new(token_address, args.client.provider().clone());
    let is_minter = token.isMinter(crowdsale_address).call().await?._0;
    assert!(is_minter, "crowdsale was not granted the minter role");

    Ok(())
}

/// Deploy the suite and check staking's constructor received the token's
/// resolved address, not a placeholder
pub(crate) async fn test_address_resolution<P: Provider + Clone>(args: &TestArgs<P>) -> Result<()> {
    let result = run_crowdsale_plan(args).await?;

    let token_address = deployed_address(&result, TOKEN_STEP_ID)?;
    let staking_address = deployed_address(&result, STAKING_STEP_ID)?;

    let staking = SaleChainStaking::new(staking_address, args.client.provider().clone());
    let recorded = staking.token().call().await?._0;
    assert_eq!(
        recorded, token_address,
        "staking does not point at the deployed token"
    );

    Ok(())
}

/// Corrupt the staking bytecode and check the failure is isolated to that
/// step: the token's deployment is retained, the crowdsale is never issued
pub(crate) async fn test_failure_isolation<P: Provider + Clone>(args: &TestArgs<P>) -> Result<()> {
    let mut artifacts = CrowdsaleArtifacts::load(&args.artifacts_dir)?;
    // A lone INVALID opcode reverts the deployment transaction
    artifacts.staking.bytecode = vec![0xfe].into();

    let plan = crowdsale_plan(&args.config, artifacts);
    let result = execute(&plan, &args.client).await?;

    assert!(
        matches!(
            result.status(),
            RunStatus::FailedAtStep { id, cause: FailureCause::Network(_) } if id == STAKING_STEP_ID
        ),
        "unexpected status: {:?}",
        result.status()
    );
    assert!(matches!(
        result.step(TOKEN_STEP_ID),
        Some(StepOutcome::Deployed { .. })
    ));
    assert!(result.step(CROWDSALE_STEP_ID).is_none());
    assert!(result.wiring_receipts().is_empty());

    Ok(())
}

/// A fresh token assigns no balance to its deployer until something mints
pub(crate) async fn test_token_balances<P: Provider + Clone>(args: &TestArgs<P>) -> Result<()> {
    let result = run_crowdsale_plan(args).await?;
    let token_address = deployed_address(&result, TOKEN_STEP_ID)?;

    let token = SaleChainToken::new(token_address, args.client.provider().clone());
    let balance = token.balanceOf(args.client.sender()).call().await?._0;
    assert_eq!(balance, U256::ZERO, "deployer holds an unminted balance");

    Ok(())
}
