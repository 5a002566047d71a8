use std::time::Duration;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::types::{Action, ChainId, ProtocolId};

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unsupported action: {protocol} does not support {action}")]
    UnsupportedAction { protocol: ProtocolId, action: Action },

    #[error("Invalid option `{field}`: {reason}")]
    InvalidOption { field: &'static str, reason: String },

    #[error("Unsupported asset for {protocol}: {asset}")]
    UnsupportedAsset { protocol: ProtocolId, asset: Address },

    #[error("Could not resolve address of {contract}: {reason}")]
    Resolution { contract: String, reason: String },

    #[error("Capacity exceeded: requested {requested}, maximum accepted {maximum}")]
    CapacityExceeded { requested: U256, maximum: U256 },

    #[error("Encoding error in {function}: {reason}")]
    Encoding { function: String, reason: String },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Deadline exceeded after {timeout:?}: {call}")]
    DeadlineExceeded { call: String, timeout: Duration },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No operation registered for {protocol}/{action} on chain {chain_id}")]
    NotRegistered {
        protocol: ProtocolId,
        action: Action,
        chain_id: ChainId,
    },
}

impl ProtocolError {
    pub(crate) fn missing(field: &'static str) -> Self {
        ProtocolError::InvalidOption {
            field,
            reason: "required but not set".into(),
        }
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProtocolError::Resolution { .. }
                | ProtocolError::CapacityExceeded { .. }
                | ProtocolError::Rpc(_)
                | ProtocolError::Connection(_)
                | ProtocolError::Cancelled(_)
                | ProtocolError::DeadlineExceeded { .. }
        )
    }
}

impl From<alloy::contract::Error> for ProtocolError {
    fn from(e: alloy::contract::Error) -> Self {
        ProtocolError::Rpc(e.to_string())
    }
}

impl From<alloy::transports::TransportError> for ProtocolError {
    fn from(e: alloy::transports::TransportError) -> Self {
        ProtocolError::Rpc(e.to_string())
    }
}
