//! Definitions of errors that can occur during the execution of the contract
//! management scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use deployer::PlanValidationError;

/// Errors that can occur during the execution of the contract management
/// scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading or parsing a plan or config file
    PlanParsing(String),
    /// Error reading a contract artifact from disk
    ReadArtifact(String),
    /// Error parsing a contract compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// The plan failed static validation
    InvalidPlan(PlanValidationError),
    /// The run aborted at a deployment step or wiring action
    RunFailed(String),
    /// Error reading the `deployments.json` file
    ReadDeployments(String),
    /// Error writing the `deployments.json` file
    WriteDeployments(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::PlanParsing(s) => write!(f, "error parsing plan: {}", s),
            ScriptError::ReadArtifact(s) => write!(f, "error reading artifact: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => {
                write!(f, "error initializing client: {}", s)
            }
            ScriptError::InvalidPlan(e) => write!(f, "invalid plan: {}", e),
            ScriptError::RunFailed(s) => write!(f, "run failed: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
        }
    }
}

impl Error for ScriptError {}

impl From<PlanValidationError> for ScriptError {
    fn from(err: PlanValidationError) -> Self {
        ScriptError::InvalidPlan(err)
    }
}
