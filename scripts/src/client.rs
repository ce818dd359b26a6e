//! The alloy-backed network client used to submit real transactions

use std::str::FromStr;

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    providers::{Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::{RpcError, TransportErrorKind},
};
use alloy_dyn_abi::{DynSolType, DynSolValue, JsonAbiExt};
use alloy_json_abi::{JsonAbi, Param};
use alloy_primitives::{Address, Bytes};
use deployer::{ArgValue, ContractArtifact, NetworkClient, NetworkError, Receipt};
use tracing::debug;

use crate::errors::ScriptError;

/// A [`NetworkClient`] submitting real transactions through an alloy provider
#[derive(Clone)]
pub struct RpcClient<P> {
    /// The underlying provider, with a local signer attached
    provider: P,
    /// The address of the deployer wallet
    sender: Address,
}

/// Sets up the client with which to deploy and wire contracts, attaching a
/// local wallet parsed from `priv_key` to a provider for `rpc_url`
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<RpcClient<impl Provider + Clone>, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let sender = signer.address();

    let url = rpc_url
        .parse()
        .map_err(|e| ScriptError::ClientInitialization(format!("invalid RPC URL: {}", e)))?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok(RpcClient::new(provider, sender))
}

impl<P: Provider> RpcClient<P> {
    /// Construct a client over an existing provider
    pub fn new(provider: P, sender: Address) -> Self {
        Self { provider, sender }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The address of the deployer wallet
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Submit a transaction and await its confirmed, successful receipt
    async fn send_and_confirm(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, NetworkError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(rpc_error)?;
        debug!("submitted transaction {:#x}", pending.tx_hash());
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| NetworkError::Timeout(e.to_string()))?;

        if !receipt.status() {
            return Err(NetworkError::Rejected(format!(
                "transaction {:#x} reverted",
                receipt.transaction_hash
            )));
        }

        Ok(receipt)
    }
}

impl<P: Provider> NetworkClient for RpcClient<P> {
    async fn deploy_contract(
        &self,
        artifact: &ContractArtifact,
        args: &[ArgValue],
    ) -> Result<(Address, Receipt), NetworkError> {
        let calldata = encode_constructor_args(&artifact.abi, args)?;
        let mut code = artifact.bytecode.to_vec();
        code.extend_from_slice(&calldata);

        let tx = TransactionRequest::default().with_deploy_code(code);
        let receipt = self.send_and_confirm(tx).await?;

        let address = receipt.contract_address.ok_or_else(|| {
            NetworkError::Rejected(format!(
                "no contract address in receipt for `{}`",
                artifact.name
            ))
        })?;

        Ok((address, into_receipt(&receipt)))
    }

    async fn call_method(
        &self,
        address: Address,
        abi: &JsonAbi,
        method: &str,
        args: &[ArgValue],
    ) -> Result<Receipt, NetworkError> {
        let input = encode_method_call(abi, method, args)?;
        let tx = TransactionRequest::default()
            .with_to(address)
            .with_input(Bytes::from(input));
        let receipt = self.send_and_confirm(tx).await?;

        Ok(into_receipt(&receipt))
    }
}

/// Map a provider error onto the orchestrator's network error kinds
fn rpc_error(err: RpcError<TransportErrorKind>) -> NetworkError {
    match err {
        RpcError::ErrorResp(payload) => NetworkError::Rejected(payload.to_string()),
        RpcError::Transport(kind) => NetworkError::Unreachable(kind.to_string()),
        other => NetworkError::Unreachable(other.to_string()),
    }
}

/// Project the parts of an RPC receipt the orchestrator records
fn into_receipt(receipt: &TransactionReceipt) -> Receipt {
    Receipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used.try_into().ok(),
    }
}

/// ABI-encode constructor arguments against the artifact's constructor
fn encode_constructor_args(abi: &JsonAbi, args: &[ArgValue]) -> Result<Vec<u8>, NetworkError> {
    match &abi.constructor {
        Some(constructor) => {
            let values = dyn_values(&constructor.inputs, args)?;
            constructor
                .abi_encode_input(&values)
                .map_err(|e| NetworkError::CalldataConstruction(e.to_string()))
        }
        None if args.is_empty() => Ok(Vec::new()),
        None => Err(NetworkError::CalldataConstruction(format!(
            "contract has no constructor but {} arguments were supplied",
            args.len()
        ))),
    }
}

/// ABI-encode a method call by name, selector included.
///
/// Overloaded methods resolve to their first declaration.
fn encode_method_call(
    abi: &JsonAbi,
    method: &str,
    args: &[ArgValue],
) -> Result<Vec<u8>, NetworkError> {
    let function = abi
        .functions
        .get(method)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| {
            NetworkError::CalldataConstruction(format!("method `{}` not found in ABI", method))
        })?;

    let values = dyn_values(&function.inputs, args)?;
    function
        .abi_encode_input(&values)
        .map_err(|e| NetworkError::CalldataConstruction(e.to_string()))
}

/// Convert resolved plan arguments into dynamic ABI values matching the
/// declared parameter types
fn dyn_values(params: &[Param], args: &[ArgValue]) -> Result<Vec<DynSolValue>, NetworkError> {
    if params.len() != args.len() {
        return Err(NetworkError::CalldataConstruction(format!(
            "expected {} arguments, got {}",
            params.len(),
            args.len()
        )));
    }

    params
        .iter()
        .zip(args)
        .map(|(param, arg)| dyn_value(param, arg))
        .collect()
}

/// Convert one argument against its declared parameter type
fn dyn_value(param: &Param, arg: &ArgValue) -> Result<DynSolValue, NetworkError> {
    let ty: DynSolType = param
        .ty
        .parse()
        .map_err(|e| NetworkError::CalldataConstruction(format!("parameter `{}`: {}", param.name, e)))?;

    match (&ty, arg) {
        (DynSolType::Address, ArgValue::Address(a)) => Ok(DynSolValue::Address(*a)),
        (DynSolType::Uint(size), ArgValue::Uint(u)) => Ok(DynSolValue::Uint(*u, *size)),
        (DynSolType::Bool, ArgValue::Bool(b)) => Ok(DynSolValue::Bool(*b)),
        (DynSolType::String, ArgValue::String(s)) => Ok(DynSolValue::String(s.clone())),
        (DynSolType::Bytes, ArgValue::Bytes(b)) => Ok(DynSolValue::Bytes(b.to_vec())),
        (ty, arg) => Err(NetworkError::CalldataConstruction(format!(
            "argument {:?} does not match parameter type {}",
            arg, ty
        ))),
    }
}

#[cfg(test)]
mod tests {
    use alloy_json_abi::JsonAbi;
    use alloy_primitives::{Address, U256};
    use deployer::{ArgValue, NetworkError};

    use super::{encode_constructor_args, encode_method_call};

    /// ABI with a two-argument constructor and an `addMinter` method
    const ABI: &str = r#"[
        {
            "type": "constructor",
            "inputs": [
                { "name": "name", "type": "string" },
                { "name": "decimals", "type": "uint8" }
            ],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "addMinter",
            "inputs": [{ "name": "account", "type": "address" }],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ]"#;

    /// Parse the fixture ABI
    fn abi() -> JsonAbi {
        serde_json::from_str(ABI).unwrap()
    }

    #[test]
    fn test_constructor_encoding() {
        let abi = abi();
        let args = [
            ArgValue::String("Sale Chain".to_string()),
            ArgValue::Uint(U256::from(6u64)),
        ];
        let encoded = encode_constructor_args(&abi, &args).unwrap();
        assert!(!encoded.is_empty());
        assert_eq!(encoded.len() % 32, 0);
    }

    #[test]
    fn test_method_encoding_prefixes_selector() {
        let abi = abi();
        let account = Address::repeat_byte(0x42);
        let encoded =
            encode_method_call(&abi, "addMinter", &[ArgValue::Address(account)]).unwrap();

        let selector = abi.functions["addMinter"][0].selector();
        assert_eq!(&encoded[..4], selector.as_slice());
        assert_eq!(encoded.len(), 4 + 32);
        assert_eq!(&encoded[16..36], account.as_slice());
    }

    #[test]
    fn test_unknown_method_rejected() {
        let abi = abi();
        let err = encode_method_call(&abi, "burn", &[]).unwrap_err();
        assert!(matches!(err, NetworkError::CalldataConstruction(_)));
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let abi = abi();
        let err = encode_method_call(&abi, "addMinter", &[]).unwrap_err();
        assert!(matches!(err, NetworkError::CalldataConstruction(_)));
    }

    #[test]
    fn test_constructorless_contract_takes_no_arguments() {
        let abi: JsonAbi = serde_json::from_str("[]").unwrap();
        assert!(encode_constructor_args(&abi, &[]).unwrap().is_empty());

        let err =
            encode_constructor_args(&abi, &[ArgValue::Bool(true)]).unwrap_err();
        assert!(matches!(err, NetworkError::CalldataConstruction(_)));
    }
}
