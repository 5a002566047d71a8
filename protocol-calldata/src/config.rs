//! Construction-time configuration for dynamic operations.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::address_book::MAINNET_ROCKET_STORAGE;
use crate::error::ProtocolError;
use crate::types::{ChainId, MAINNET};

pub const ENV_RPC_URL: &str = "ROCKET_POOL_RPC_URL";
pub const ENV_STORAGE_ADDRESS: &str = "ROCKET_POOL_STORAGE_ADDRESS";
pub const ENV_CHAIN_ID: &str = "ROCKET_POOL_CHAIN_ID";

/// Where to reach Rocket Pool: the RPC endpoint and its RocketStorage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RocketPoolConfig {
    /// JSON-RPC endpoint (http or https).
    pub rpc_url: String,
    /// RocketStorage contract address (hex).
    #[serde(default = "default_storage_address")]
    pub storage_address: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: ChainId,
}

fn default_storage_address() -> String {
    MAINNET_ROCKET_STORAGE.to_string()
}

fn default_chain_id() -> ChainId {
    MAINNET
}

impl RocketPoolConfig {
    /// Mainnet configuration for the given endpoint.
    pub fn mainnet(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            storage_address: default_storage_address(),
            chain_id: default_chain_id(),
        }
    }

    /// Read `ROCKET_POOL_RPC_URL` (required), `ROCKET_POOL_STORAGE_ADDRESS`
    /// and `ROCKET_POOL_CHAIN_ID`.
    pub fn from_env() -> Result<Self, ProtocolError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, ProtocolError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup(ENV_RPC_URL)
            .ok_or_else(|| ProtocolError::Config(format!("{ENV_RPC_URL} must be set")))?;
        let storage_address = lookup(ENV_STORAGE_ADDRESS).unwrap_or_else(default_storage_address);
        let chain_id = match lookup(ENV_CHAIN_ID) {
            Some(raw) => raw.trim().parse().map_err(|e| {
                ProtocolError::Config(format!("Invalid {ENV_CHAIN_ID} '{raw}': {e}"))
            })?,
            None => default_chain_id(),
        };

        let config = Self {
            rpc_url,
            storage_address,
            chain_id,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProtocolError> {
        let url: url::Url = self.rpc_url.parse().map_err(|e| {
            ProtocolError::Config(format!("Invalid RPC URL '{}': {e}", self.rpc_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProtocolError::Config(format!(
                "RPC URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        self.storage_address()?;
        Ok(())
    }

    /// Parsed RocketStorage address; the zero address is rejected.
    pub fn storage_address(&self) -> Result<Address, ProtocolError> {
        let address: Address = self.storage_address.parse().map_err(|e| {
            ProtocolError::Config(format!(
                "Invalid storage address '{}': {e}",
                self.storage_address
            ))
        })?;
        if address.is_zero() {
            return Err(ProtocolError::Config(
                "storage address must not be the zero address".into(),
            ));
        }
        Ok(address)
    }
}
