//! Test support: an in-memory network client with scripted behavior.
//!
//! Used by this crate's own tests and by downstream harnesses that need to
//! exercise orchestration without a node.

use std::{collections::HashMap, sync::Mutex};

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes, TxHash};

use crate::{
    client::{NetworkClient, NetworkError, Receipt},
    plan::{ArgValue, ContractArtifact},
};

/// A record of a single call observed by the mock client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// A contract deployment
    Deploy {
        /// The artifact name deployed
        contract: String,
        /// The fully resolved constructor arguments
        args: Vec<ArgValue>,
    },
    /// A method call
    Call {
        /// The target contract address
        address: Address,
        /// The method name
        method: String,
        /// The fully resolved arguments
        args: Vec<ArgValue>,
    },
}

/// Mutable call log and sequence counters, behind one lock
#[derive(Default)]
struct MockState {
    /// Calls observed so far, in issue order
    calls: Vec<RecordedCall>,
    /// Number of successful deployments so far
    deployments: u64,
    /// Number of confirmed transactions so far
    transactions: u64,
}

/// In-memory [`NetworkClient`] recording every call it receives.
///
/// Deployed addresses and transaction hashes are derived from sequence
/// counters, so repeated runs of the same plan against fresh clients produce
/// identical traces. Individual contracts and methods can be scripted to
/// fail by name; a failing call is still recorded, mirroring a transaction
/// that was submitted and then rejected.
#[derive(Default)]
pub struct MockNetworkClient {
    /// Call log and counters
    state: Mutex<MockState>,
    /// Contract names whose deployment fails
    failing_deploys: HashMap<String, NetworkError>,
    /// Method names whose invocation fails
    failing_methods: HashMap<String, NetworkError>,
}

impl MockNetworkClient {
    /// A client on which every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the deployment of `contract` to fail with `error`
    pub fn with_failing_deployment(mut self, contract: impl Into<String>, error: NetworkError) -> Self {
        self.failing_deploys.insert(contract.into(), error);
        self
    }

    /// Script calls to `method` to fail with `error`
    pub fn with_failing_method(mut self, method: impl Into<String>, error: NetworkError) -> Self {
        self.failing_methods.insert(method.into(), error);
        self
    }

    /// Snapshot of the calls observed so far, in issue order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl NetworkClient for MockNetworkClient {
    async fn deploy_contract(
        &self,
        artifact: &ContractArtifact,
        args: &[ArgValue],
    ) -> Result<(Address, Receipt), NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Deploy {
            contract: artifact.name.clone(),
            args: args.to_vec(),
        });

        if let Some(error) = self.failing_deploys.get(&artifact.name) {
            return Err(error.clone());
        }

        let address = mock_address(state.deployments);
        state.deployments += 1;
        let receipt = next_receipt(&mut state);
        Ok((address, receipt))
    }

    async fn call_method(
        &self,
        address: Address,
        _abi: &JsonAbi,
        method: &str,
        args: &[ArgValue],
    ) -> Result<Receipt, NetworkError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Call {
            address,
            method: method.to_string(),
            args: args.to_vec(),
        });

        if let Some(error) = self.failing_methods.get(method) {
            return Err(error.clone());
        }

        Ok(next_receipt(&mut state))
    }
}

/// The address assigned to the `n`th successful deployment (0-indexed).
///
/// Never the zero address, which some nodes treat as special.
pub fn mock_address(n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&(n + 1).to_be_bytes());
    Address::from(bytes)
}

/// Mint the receipt for the next confirmed transaction
fn next_receipt(state: &mut MockState) -> Receipt {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&(state.transactions + 1).to_be_bytes());
    state.transactions += 1;
    Receipt {
        tx_hash: TxHash::from(bytes),
        block_number: Some(state.transactions),
        gas_used: Some(21_000),
    }
}

/// A minimal artifact for orchestration tests; the mock client never
/// inspects the ABI or bytecode
pub fn test_artifact(name: &str) -> ContractArtifact {
    ContractArtifact {
        name: name.to_string(),
        abi: JsonAbi::new(),
        bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
    }
}
