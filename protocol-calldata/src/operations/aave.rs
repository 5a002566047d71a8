use std::sync::Arc;

use alloy::primitives::{Address, U256, address};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ProtocolOperation, register_all};
use crate::calldata::encode_call;
use crate::context::CallContext;
use crate::contracts::IPool;
use crate::error::ProtocolError;
use crate::registry::ProtocolRegistry;
use crate::types::{Action, ChainId, GenerateCalldataOptions, MAINNET, ProtocolId, is_native_asset};

/// Aave V3 Pool on Ethereum mainnet
const AAVE_V3_POOL: Address = address!("0x87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2");

/// SparkLend Pool on Ethereum mainnet
const SPARK_LEND_POOL: Address = address!("0xC13e21B648A5Ee794902342038FF3aDAB66BE987");

const SUPPORTED_ACTIONS: &[Action] = &[Action::Supply, Action::Withdraw];

/// Deployments sharing the Aave V3 Pool interface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AaveFork {
    Aave,
    Spark,
}

impl AaveFork {
    pub fn protocol_id(&self) -> ProtocolId {
        match self {
            AaveFork::Aave => ProtocolId::AaveV3,
            AaveFork::Spark => ProtocolId::SparkLend,
        }
    }

    pub fn mainnet_pool(&self) -> Address {
        match self {
            AaveFork::Aave => AAVE_V3_POOL,
            AaveFork::Spark => SPARK_LEND_POOL,
        }
    }
}

/// Static encoder for the Aave V3 lending pool and its forks.
///
/// The fork only changes the reported identity and the pool address; the
/// encoding is identical for every fork.
#[derive(Debug, Clone)]
pub struct AaveOperation {
    fork: AaveFork,
    chain_id: ChainId,
    pool_address: Address,
}

impl AaveOperation {
    /// Operation for the fork's Ethereum mainnet pool.
    pub fn new(fork: AaveFork) -> Self {
        Self::with_pool(fork, MAINNET, fork.mainnet_pool())
    }

    pub fn with_pool(fork: AaveFork, chain_id: ChainId, pool_address: Address) -> Self {
        Self {
            fork,
            chain_id,
            pool_address,
        }
    }

    pub fn fork(&self) -> AaveFork {
        self.fork
    }

    /// Register under (fork, action, chain) for every supported action.
    pub fn register(self, registry: &ProtocolRegistry) -> Arc<Self> {
        register_all(self, registry)
    }

    /// Encode `supply(address,uint256,address,uint16)`.
    fn encode_supply(
        &self,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> String {
        encode_call(&IPool::supplyCall {
            asset,
            amount,
            onBehalfOf: on_behalf_of,
            referralCode: referral_code,
        })
    }

    /// Encode `withdraw(address,uint256,address)`.
    fn encode_withdraw(&self, asset: Address, amount: U256, to: Address) -> String {
        encode_call(&IPool::withdrawCall { asset, amount, to })
    }
}

#[async_trait]
impl ProtocolOperation for AaveOperation {
    fn name(&self) -> ProtocolId {
        self.fork.protocol_id()
    }

    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn supported_actions(&self) -> &[Action] {
        SUPPORTED_ACTIONS
    }

    async fn generate_calldata(
        &self,
        _ctx: &CallContext,
        action: Action,
        options: &GenerateCalldataOptions,
    ) -> Result<String, ProtocolError> {
        let calldata = match action {
            Action::Supply => {
                let asset = options.require_asset()?;
                let amount = options.require_amount()?;
                let sender = options.require_sender()?;
                self.validate(asset)?;
                self.encode_supply(asset, amount, sender, options.referral_code.unwrap_or(0))
            }
            Action::Withdraw => {
                let asset = options.require_asset()?;
                let amount = options.require_amount()?;
                // Funds go back to the sender unless a recipient is given.
                let to = options
                    .recipient
                    .or(options.sender)
                    .ok_or_else(|| ProtocolError::missing("recipient"))?;
                self.validate(asset)?;
                self.encode_withdraw(asset, amount, to)
            }
            _ => {
                return Err(ProtocolError::UnsupportedAction {
                    protocol: self.name(),
                    action,
                });
            }
        };

        debug!(protocol = %self.name(), %action, %calldata, "generated calldata");
        Ok(calldata)
    }

    fn validate(&self, asset: Address) -> Result<(), ProtocolError> {
        // The pool only lends ERC-20 reserves; native ETH goes through a gateway.
        if is_native_asset(asset) {
            return Err(ProtocolError::UnsupportedAsset {
                protocol: self.name(),
                asset,
            });
        }
        Ok(())
    }

    fn contract_address(&self) -> Result<Address, ProtocolError> {
        Ok(self.pool_address)
    }
}
