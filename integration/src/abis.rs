//! Contract bindings used by the integration test assertions

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface SaleChainToken {
        function balanceOf(address account) external view returns (uint256);
        function isMinter(address account) external view returns (bool);
        function addMinter(address account) external;
    }

    #[sol(rpc)]
    interface SaleChainStaking {
        function token() external view returns (address);
    }
}
