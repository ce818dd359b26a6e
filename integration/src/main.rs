//! Integration tests for the crowdsale deployment scripts. These assume that
//! a devnet is already running locally.

use clap::Parser;
use cli::{Cli, Tests};
use colored::Colorize;
use eyre::Result;
use scripts::{client::setup_client, migrations::CrowdsaleConfig};
use tests::{
    test_address_resolution, test_crowdsale_suite, test_failure_isolation, test_token_balances,
};
use utils::TestArgs;

mod abis;
mod cli;
mod constants;
mod tests;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        test,
        config,
        artifacts_dir,
        priv_key,
        rpc_url,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&priv_key, &rpc_url).await?;
    let config = CrowdsaleConfig::read(&config)?;
    let args = TestArgs {
        client,
        config,
        artifacts_dir,
    };

    match test {
        Tests::CrowdsaleSuite => test_crowdsale_suite(&args).await?,
        Tests::AddressResolution => test_address_resolution(&args).await?,
        Tests::FailureIsolation => test_failure_isolation(&args).await?,
        Tests::TokenBalances => test_token_balances(&args).await?,
    }

    println!("{}", format!("{:?} passed", test).green());

    Ok(())
}
