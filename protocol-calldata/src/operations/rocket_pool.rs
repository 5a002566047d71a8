use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use alloy::providers::RootProvider;
use async_trait::async_trait;
use tracing::{debug, info};

use super::{ProtocolOperation, register_all};
use crate::address_book::AddressBook;
use crate::calldata::encode_call;
use crate::chain::ChainReader;
use crate::config::RocketPoolConfig;
use crate::context::CallContext;
use crate::contracts::{IRocketDepositPool, IRocketTokenRETH};
use crate::error::ProtocolError;
use crate::registry::ProtocolRegistry;
use crate::types::{Action, ChainId, GenerateCalldataOptions, ProtocolId, is_native_asset};

/// RocketStorage name of the ETH deposit entry point
pub const DEPOSIT_POOL_CONTRACT: &str = "rocketDepositPool";

/// RocketStorage name of the rETH receipt token
pub const RETH_CONTRACT: &str = "rocketTokenRETH";

const SUPPORTED_ACTIONS: &[Action] = &[Action::Stake, Action::Unstake];

/// Rocket Pool liquid staking.
///
/// Each instance is bound to one action. The deposit pool and rETH token
/// addresses are read from RocketStorage once, in [`RocketPoolOperation::connect`],
/// and never refreshed; connect again to pick up a contract upgrade.
pub struct RocketPoolOperation {
    action: Action,
    chain_id: ChainId,
    deposit_pool: IRocketDepositPool::IRocketDepositPoolInstance<RootProvider>,
    reth: IRocketTokenRETH::IRocketTokenRETHInstance<RootProvider>,
}

impl RocketPoolOperation {
    /// Connect to the chain and resolve the network contracts.
    ///
    /// Fails before any network I/O if `action` is not stake or unstake.
    pub async fn connect(
        config: &RocketPoolConfig,
        action: Action,
        ctx: &CallContext,
    ) -> Result<Self, ProtocolError> {
        if !SUPPORTED_ACTIONS.contains(&action) {
            return Err(ProtocolError::UnsupportedAction {
                protocol: ProtocolId::RocketPool,
                action,
            });
        }
        config.validate()?;

        let reader = ChainReader::connect(&config.rpc_url, config.chain_id, ctx).await?;
        let provider = reader.provider().clone();
        let address_book = AddressBook::new(config.storage_address()?, provider.clone());

        let deposit_pool = address_book.resolve(ctx, DEPOSIT_POOL_CONTRACT).await?;
        let reth = address_book.resolve(ctx, RETH_CONTRACT).await?;

        info!(
            %action,
            chain_id = reader.chain_id(),
            %deposit_pool,
            %reth,
            "rocket pool operation ready"
        );

        Ok(Self {
            action,
            chain_id: reader.chain_id(),
            deposit_pool: IRocketDepositPool::new(deposit_pool, provider.clone()),
            reth: IRocketTokenRETH::new(reth, provider),
        })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn deposit_pool_address(&self) -> Address {
        *self.deposit_pool.address()
    }

    pub fn reth_address(&self) -> Address {
        *self.reth.address()
    }

    /// Register under (rocket_pool, action, chain) for the bound action.
    pub fn register(self, registry: &ProtocolRegistry) -> Arc<Self> {
        register_all(self, registry)
    }

    /// Current deposit cap of the deposit pool.
    pub async fn maximum_deposit(&self, ctx: &CallContext) -> Result<U256, ProtocolError> {
        ctx.run("getMaximumDepositAmount", async {
            self.deposit_pool.getMaximumDepositAmount().call().await
        })
        .await
    }

    /// Encode `deposit()` once the amount fits under the live deposit cap.
    async fn deposit(
        &self,
        ctx: &CallContext,
        options: &GenerateCalldataOptions,
    ) -> Result<String, ProtocolError> {
        let amount = options.require_amount()?;
        if let Some(asset) = options.asset {
            self.validate(asset)?;
        }

        let maximum = self.maximum_deposit(ctx).await?;
        debug!(%amount, %maximum, "checked rocket pool deposit cap");
        if amount > maximum {
            return Err(ProtocolError::CapacityExceeded {
                requested: amount,
                maximum,
            });
        }

        Ok(encode_call(&IRocketDepositPool::depositCall {}))
    }

    /// Encode `transfer(address,uint256)` of rETH.
    fn withdraw(&self, options: &GenerateCalldataOptions) -> Result<String, ProtocolError> {
        let recipient = options.require_recipient()?;
        let amount = options.require_amount()?;
        Ok(encode_call(&IRocketTokenRETH::transferCall { recipient, amount }))
    }
}

#[async_trait]
impl ProtocolOperation for RocketPoolOperation {
    fn name(&self) -> ProtocolId {
        ProtocolId::RocketPool
    }

    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn supported_actions(&self) -> &[Action] {
        std::slice::from_ref(&self.action)
    }

    async fn generate_calldata(
        &self,
        ctx: &CallContext,
        action: Action,
        options: &GenerateCalldataOptions,
    ) -> Result<String, ProtocolError> {
        let unsupported = || ProtocolError::UnsupportedAction {
            protocol: ProtocolId::RocketPool,
            action,
        };
        if action != self.action {
            return Err(unsupported());
        }

        let calldata = match action {
            Action::Stake => self.deposit(ctx, options).await?,
            Action::Unstake => self.withdraw(options)?,
            _ => return Err(unsupported()),
        };

        debug!(protocol = %self.name(), %action, %calldata, "generated calldata");
        Ok(calldata)
    }

    fn validate(&self, asset: Address) -> Result<(), ProtocolError> {
        if is_native_asset(asset) {
            return Ok(());
        }
        Err(ProtocolError::UnsupportedAsset {
            protocol: ProtocolId::RocketPool,
            asset,
        })
    }

    fn contract_address(&self) -> Result<Address, ProtocolError> {
        match self.action {
            Action::Stake => Ok(self.deposit_pool_address()),
            _ => Ok(self.reth_address()),
        }
    }

    fn value(&self, action: Action, options: &GenerateCalldataOptions) -> U256 {
        match action {
            Action::Stake => options.amount.unwrap_or(U256::ZERO),
            _ => U256::ZERO,
        }
    }
}

impl fmt::Debug for RocketPoolOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RocketPoolOperation")
            .field("action", &self.action)
            .field("chain_id", &self.chain_id)
            .field("deposit_pool", &self.deposit_pool_address())
            .field("reth", &self.reth_address())
            .finish()
    }
}
