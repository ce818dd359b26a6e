//! The network capability consumed by the executor

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    future::Future,
};

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::plan::{ArgValue, ContractArtifact};

/// Confirmation record returned by the network once a submitted transaction
/// is included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// The hash of the confirmed transaction
    pub tx_hash: TxHash,
    /// The block in which the transaction was included, if the node reports it
    pub block_number: Option<u64>,
    /// The gas consumed by the transaction, if the node reports it
    pub gas_used: Option<u64>,
}

/// Errors reported by a [`NetworkClient`] for a single deployment or method
/// call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkError {
    /// The transaction was submitted but rejected or reverted by the network
    Rejected(String),
    /// The client timed out awaiting confirmation
    Timeout(String),
    /// The node could not be reached
    Unreachable(String),
    /// Constructor or method calldata could not be constructed
    CalldataConstruction(String),
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Rejected(s) => write!(f, "transaction rejected: {}", s),
            NetworkError::Timeout(s) => write!(f, "timed out awaiting confirmation: {}", s),
            NetworkError::Unreachable(s) => write!(f, "node unreachable: {}", s),
            NetworkError::CalldataConstruction(s) => {
                write!(f, "error constructing calldata: {}", s)
            }
        }
    }
}

impl Error for NetworkError {}

/// An opaque connection to a blockchain node, able to deploy contracts and
/// call methods on them.
///
/// Each method submits a transaction and suspends until the network confirms
/// it or reports failure. The executor issues calls strictly one at a time,
/// so implementations need not support concurrent submission from a single
/// run.
pub trait NetworkClient {
    /// Deploy `artifact` with the given constructor arguments, returning the
    /// deployed contract's address along with the deployment receipt
    fn deploy_contract(
        &self,
        artifact: &ContractArtifact,
        args: &[ArgValue],
    ) -> impl Future<Output = Result<(Address, Receipt), NetworkError>>;

    /// Call `method` on the contract at `address`, encoding the arguments
    /// against `abi`, and return the call's receipt
    fn call_method(
        &self,
        address: Address,
        abi: &JsonAbi,
        method: &str,
        args: &[ArgValue],
    ) -> impl Future<Output = Result<Receipt, NetworkError>>;
}
