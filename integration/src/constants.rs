//! Constants for the integration tests

/// The default devnet private key, the first default account in an Anvil node
pub(crate) const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default devnet RPC URL
pub(crate) const DEFAULT_DEVNET_HOSTPORT: &str = "http://localhost:8545";
