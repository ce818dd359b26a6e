//! Definition of the CLI arguments for integration tests

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::{DEFAULT_DEVNET_HOSTPORT, DEFAULT_DEVNET_PKEY};

/// CLI tool for running integration tests against a running devnet node.
///
/// Assumes that the crowdsale suite contracts have already been compiled
/// into the artifacts directory.
#[derive(Parser)]
pub(crate) struct Cli {
    /// Test to run
    #[arg(short, long)]
    pub(crate) test: Tests,

    /// Path to the crowdsale deployment config
    #[arg(short, long, default_value = "crowdsale.devnet.json")]
    pub(crate) config: PathBuf,

    /// Directory containing compiled contract artifacts
    #[arg(short, long, default_value = "artifacts")]
    pub(crate) artifacts_dir: PathBuf,

    /// Devnet private key, defaults to the default Anvil dev key
    #[arg(short, long, default_value = DEFAULT_DEVNET_PKEY)]
    pub(crate) priv_key: String,

    /// Devnet RPC URL
    #[arg(short, long, default_value = DEFAULT_DEVNET_HOSTPORT)]
    pub(crate) rpc_url: String,
}

/// The available integration tests
#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum Tests {
    /// Full migration: every contract deploys and the minter wiring lands
    CrowdsaleSuite,
    /// Staking's constructor receives the token's resolved address
    AddressResolution,
    /// A failing middle step leaves earlier deployments intact and issues
    /// nothing further
    FailureIsolation,
    /// A fresh token assigns no balance to its deployer until minted
    TokenBalances,
}
