//! Definitions of CLI arguments and commands for the deploy scripts

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use deployer::NetworkClient;

use crate::{
    commands::{check_plan, migrate, run_plan},
    errors::ScriptError,
};

/// CLI for deploying and wiring the crowdsale contract suite
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "DEPLOYER_PRIV_KEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long)]
    pub rpc_url: String,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, default_value = "deployments.json")]
    pub deployments_path: PathBuf,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// The deploy script subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Execute a plan file against the network
    Run(RunArgs),
    /// Validate a plan file without touching the network
    Check(CheckArgs),
    /// Deploy the crowdsale suite from a config file
    Migrate(MigrateArgs),
}

impl Command {
    /// Dispatch the parsed subcommand
    pub async fn run<C: NetworkClient>(
        self,
        client: &C,
        deployments_path: &Path,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Run(args) => run_plan(args, client, deployments_path).await,
            Command::Check(args) => check_plan(args),
            Command::Migrate(args) => migrate(args, client, deployments_path).await,
        }
    }
}

/// Execute a plan file
#[derive(Args)]
pub struct RunArgs {
    /// Path to the plan file
    pub plan: PathBuf,

    /// Directory containing compiled contract artifacts
    #[arg(short, long, default_value = "artifacts")]
    pub artifacts_dir: PathBuf,
}

/// Validate a plan file without executing it
#[derive(Args)]
pub struct CheckArgs {
    /// Path to the plan file
    pub plan: PathBuf,

    /// Directory containing compiled contract artifacts
    #[arg(short, long, default_value = "artifacts")]
    pub artifacts_dir: PathBuf,
}

/// Deploy the crowdsale suite
#[derive(Args)]
pub struct MigrateArgs {
    /// Path to the crowdsale deployment config
    pub config: PathBuf,

    /// Directory containing compiled contract artifacts
    #[arg(short, long, default_value = "artifacts")]
    pub artifacts_dir: PathBuf,
}
