//! Constants used in the deploy scripts

/// The contract name of the token artifact
pub const TOKEN_CONTRACT_NAME: &str = "SaleChainToken";

/// The contract name of the staking artifact
pub const STAKING_CONTRACT_NAME: &str = "SaleChainStaking";

/// The contract name of the crowdsale artifact
pub const CROWDSALE_CONTRACT_NAME: &str = "SaleChainCrowdsale";

/// The step identifier of the token deployment
pub const TOKEN_STEP_ID: &str = "token";

/// The step identifier of the staking deployment
pub const STAKING_STEP_ID: &str = "staking";

/// The step identifier of the crowdsale deployment
pub const CROWDSALE_STEP_ID: &str = "crowdsale";

/// The token method granting an account the right to mint
pub const ADD_MINTER_METHOD: &str = "addMinter";

/// The top-level key under which addresses are recorded in the
/// `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The file extension of contract artifacts
pub const ARTIFACT_EXTENSION: &str = "json";
