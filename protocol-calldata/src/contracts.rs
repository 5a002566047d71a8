//! Solidity contract bindings for every protocol the registry encodes for.
//!
//! Uses alloy's `sol!` macro to generate type-safe ABI encoders/decoders.
//! Contracts that are read at construction or generation time carry
//! `#[sol(rpc)]` so they can be bound to a provider.

use alloy::sol;

sol! {
    /// Aave V3 Pool, shared by every Aave V3 fork.
    interface IPool {
        function supply(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external;
        function withdraw(address asset, uint256 amount, address to) external returns (uint256);
    }

    /// Rocket Pool's canonical address book.
    #[sol(rpc)]
    interface IRocketStorage {
        function getAddress(bytes32 key) external view returns (address);
    }

    #[sol(rpc)]
    interface IRocketDepositPool {
        function deposit() external payable;
        function getMaximumDepositAmount() external view returns (uint256);
    }

    #[sol(rpc)]
    interface IRocketTokenRETH {
        function transfer(address recipient, uint256 amount) external returns (bool);
    }
}
