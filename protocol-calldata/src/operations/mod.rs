pub mod aave;
pub mod rocket_pool;

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tracing::info;

use crate::context::CallContext;
use crate::error::ProtocolError;
use crate::registry::ProtocolRegistry;
use crate::types::{Action, ChainId, GenerateCalldataOptions, ProtocolId};

/// Common contract of every protocol encoder.
#[async_trait]
pub trait ProtocolOperation: Send + Sync {
    /// Protocol (or fork) identity
    fn name(&self) -> ProtocolId;

    /// Chain the operation was constructed for
    fn chain_id(&self) -> ChainId;

    /// Actions this operation accepts; always a subset of [`Action`].
    fn supported_actions(&self) -> &[Action];

    /// Validate `options` for `action` and encode the call as `0x`-prefixed hex.
    async fn generate_calldata(
        &self,
        ctx: &CallContext,
        action: Action,
        options: &GenerateCalldataOptions,
    ) -> Result<String, ProtocolError>;

    /// Check that `asset` can be used with this protocol.
    fn validate(&self, asset: Address) -> Result<(), ProtocolError>;

    /// Contract the generated calldata must be sent to. Never touches the network.
    fn contract_address(&self) -> Result<Address, ProtocolError>;

    /// Native coin to attach to the call.
    fn value(&self, _action: Action, _options: &GenerateCalldataOptions) -> U256 {
        U256::ZERO
    }
}

/// Everything needed to build the transaction for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCall {
    pub to: Address,
    pub calldata: String,
    pub value: U256,
    pub chain_id: ChainId,
}

/// Generate calldata and pair it with the target contract and attached value.
pub async fn prepare_call(
    operation: &dyn ProtocolOperation,
    ctx: &CallContext,
    action: Action,
    options: &GenerateCalldataOptions,
) -> Result<PreparedCall, ProtocolError> {
    let calldata = operation.generate_calldata(ctx, action, options).await?;
    Ok(PreparedCall {
        to: operation.contract_address()?,
        calldata,
        value: operation.value(action, options),
        chain_id: operation.chain_id(),
    })
}

/// Register `operation` under every action it supports and hand back the
/// shared instance.
pub(crate) fn register_all<O>(operation: O, registry: &ProtocolRegistry) -> Arc<O>
where
    O: ProtocolOperation + 'static,
{
    let operation = Arc::new(operation);
    for &action in operation.supported_actions() {
        registry.register(
            operation.name(),
            action,
            operation.chain_id(),
            operation.clone(),
        );
    }
    info!(
        protocol = %operation.name(),
        chain_id = operation.chain_id(),
        actions = operation.supported_actions().len(),
        "registered protocol operation"
    );
    operation
}
