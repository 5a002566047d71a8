//! End-to-end lookups through a registry shared by Aave, Spark and Rocket Pool.

mod common;

use std::sync::Arc;

use alloy::primitives::address;
use common::{DEPOSIT_POOL, MockNode, RETH, STORAGE, ether};
use protocol_calldata::config::RocketPoolConfig;
use protocol_calldata::contracts::IPool;
use protocol_calldata::{
    AaveFork, AaveOperation, Action, CallContext, GenerateCalldataOptions, MAINNET, ProtocolError,
    ProtocolId, ProtocolRegistry, RocketPoolOperation, decode_calldata, prepare_call,
};

const DAI: alloy::primitives::Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");
const USER: alloy::primitives::Address = address!("0x1234567890123456789012345678901234567890");

async fn populated_registry(server: &wiremock::MockServer) -> ProtocolRegistry {
    let registry = ProtocolRegistry::new();
    AaveOperation::new(AaveFork::Aave).register(&registry);
    AaveOperation::new(AaveFork::Spark).register(&registry);

    let config = RocketPoolConfig {
        rpc_url: server.uri(),
        storage_address: STORAGE.to_string(),
        chain_id: MAINNET,
    };
    RocketPoolOperation::connect(&config, Action::Stake, &CallContext::new())
        .await
        .unwrap()
        .register(&registry);
    registry
}

#[tokio::test]
async fn test_registry_serves_every_protocol() {
    let server = MockNode::new(ether(100)).start().await;
    let registry = populated_registry(&server).await;
    assert_eq!(registry.len(), 5);

    let ctx = CallContext::new();
    let supply = GenerateCalldataOptions::new()
        .asset(DAI)
        .amount(ether(1))
        .sender(USER);

    for protocol in [ProtocolId::AaveV3, ProtocolId::SparkLend] {
        let op = registry.require(protocol, Action::Supply, MAINNET).unwrap();
        let call = prepare_call(op.as_ref(), &ctx, Action::Supply, &supply)
            .await
            .unwrap();
        let decoded: IPool::supplyCall = decode_calldata(&call.calldata).unwrap();
        assert_eq!(decoded.asset, DAI);
        assert_eq!(decoded.onBehalfOf, USER);
        assert_eq!(call.value, alloy::primitives::U256::ZERO);
    }

    let stake = registry
        .require(ProtocolId::RocketPool, Action::Stake, MAINNET)
        .unwrap();
    let call = prepare_call(
        stake.as_ref(),
        &ctx,
        Action::Stake,
        &GenerateCalldataOptions::new().amount(ether(1)),
    )
    .await
    .unwrap();
    assert_eq!(call.to, DEPOSIT_POOL);
    assert_eq!(call.value, ether(1));
}

#[tokio::test]
async fn test_unregistered_combinations() {
    let server = MockNode::new(ether(100)).start().await;
    let registry = populated_registry(&server).await;

    assert!(registry.resolve(ProtocolId::RocketPool, Action::Unstake, MAINNET).is_none());
    assert!(registry.resolve(ProtocolId::AaveV3, Action::Stake, MAINNET).is_none());
    assert!(registry.resolve(ProtocolId::AaveV3, Action::Supply, 10).is_none());

    let err = registry
        .require(ProtocolId::RocketPool, Action::Unstake, MAINNET)
        .err()
        .unwrap();
    assert!(matches!(err, ProtocolError::NotRegistered { .. }));
}

#[tokio::test]
async fn test_unstake_registration_sits_beside_stake() {
    let server = MockNode::new(ether(100)).start().await;
    let registry = populated_registry(&server).await;

    let config = RocketPoolConfig {
        rpc_url: server.uri(),
        storage_address: STORAGE.to_string(),
        chain_id: MAINNET,
    };
    let unstake: Arc<RocketPoolOperation> =
        RocketPoolOperation::connect(&config, Action::Unstake, &CallContext::new())
            .await
            .unwrap()
            .register(&registry);
    assert_eq!(registry.len(), 6);
    assert_eq!(unstake.reth_address(), RETH);

    let resolved = registry
        .require(ProtocolId::RocketPool, Action::Unstake, MAINNET)
        .unwrap();
    assert_eq!(resolved.contract_address().unwrap(), RETH);
    let stake = registry
        .require(ProtocolId::RocketPool, Action::Stake, MAINNET)
        .unwrap();
    assert_eq!(stake.contract_address().unwrap(), DEPOSIT_POOL);
}
