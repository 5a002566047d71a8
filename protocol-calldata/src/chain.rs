//! Read-only chain client for EVM-compatible networks.
//!
//! Wraps an alloy HTTP provider without any signer or fillers: the
//! registry only ever issues `eth_chainId` and `eth_call`.

use alloy::providers::{Provider, RootProvider};
use tracing::debug;

use crate::context::CallContext;
use crate::error::ProtocolError;
use crate::types::ChainId;

/// A connected read-only client bound to one chain.
#[derive(Clone)]
pub struct ChainReader {
    provider: RootProvider,
    chain_id: ChainId,
}

impl ChainReader {
    /// Connect to `rpc_url` and check that the node serves `expected_chain_id`.
    pub async fn connect(
        rpc_url: &str,
        expected_chain_id: ChainId,
        ctx: &CallContext,
    ) -> Result<Self, ProtocolError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| ProtocolError::Config(format!("Invalid RPC URL '{rpc_url}': {e}")))?;

        let provider = RootProvider::new_http(url);
        let chain_id = ctx
            .run("eth_chainId", async {
                provider
                    .get_chain_id()
                    .await
                    .map_err(|e| ProtocolError::Connection(format!("{rpc_url}: {e}")))
            })
            .await?;

        if chain_id != expected_chain_id {
            return Err(ProtocolError::Connection(format!(
                "{rpc_url} serves chain {chain_id}, expected {expected_chain_id}"
            )));
        }

        debug!(rpc_url, chain_id, "connected chain reader");
        Ok(Self { provider, chain_id })
    }

    pub fn provider(&self) -> &RootProvider {
        &self.provider
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }
}
