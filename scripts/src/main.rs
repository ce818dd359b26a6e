//! Entrypoint for the deploy scripts

use clap::Parser;
use scripts::{cli::Cli, client::setup_client, errors::ScriptError};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        deployments_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&priv_key, &rpc_url).await?;

    command.run(&client, &deployments_path).await
}
