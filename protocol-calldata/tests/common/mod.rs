//! In-process JSON-RPC node for Rocket Pool tests.
//!
//! Answers `eth_chainId` and the `eth_call`s the registry issues against
//! RocketStorage and the deposit pool. Anything else reverts.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use alloy::primitives::{Address, B256, U256, address};
use alloy::sol_types::{SolCall, SolValue};
use protocol_calldata::address_book::contract_address_key;
use protocol_calldata::contracts::{IRocketDepositPool, IRocketStorage};
use protocol_calldata::operations::rocket_pool::{DEPOSIT_POOL_CONTRACT, RETH_CONTRACT};
use serde_json::{Value, json};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const STORAGE: Address = address!("0x00000000000000000000000000000000000005ee");
pub const DEPOSIT_POOL: Address = address!("0x00000000000000000000000000000000000000d1");
pub const RETH: Address = address!("0x00000000000000000000000000000000000000e2");

static LOG_INIT: Once = Once::new();

pub fn setup_log() {
    LOG_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// One ether in wei.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(1_000_000_000_000_000_000u64)
}

#[derive(Clone)]
pub struct MockNode {
    pub chain_id: u64,
    pub entries: HashMap<B256, Address>,
    pub max_deposit: Arc<Mutex<U256>>,
    pub delay: Option<Duration>,
    pub revert_max_deposit: bool,
}

impl MockNode {
    /// Mainnet node whose RocketStorage knows the deposit pool and rETH.
    pub fn new(max_deposit: U256) -> Self {
        let mut entries = HashMap::new();
        entries.insert(contract_address_key(DEPOSIT_POOL_CONTRACT), DEPOSIT_POOL);
        entries.insert(contract_address_key(RETH_CONTRACT), RETH);
        Self {
            chain_id: 1,
            entries,
            max_deposit: Arc::new(Mutex::new(max_deposit)),
            delay: None,
            revert_max_deposit: false,
        }
    }

    pub fn without_entry(mut self, name: &str) -> Self {
        self.entries.remove(&contract_address_key(name));
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every `getMaximumDepositAmount` call revert.
    pub fn with_reverting_max_deposit(mut self) -> Self {
        self.revert_max_deposit = true;
        self
    }

    pub fn set_max_deposit(&self, max_deposit: U256) {
        *self.max_deposit.lock().unwrap() = max_deposit;
    }

    /// Start a server answering every POST with this node.
    pub async fn start(self) -> MockServer {
        setup_log();
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(self).mount(&server).await;
        server
    }

    fn eth_call(&self, to: Address, input: &[u8]) -> Option<Vec<u8>> {
        if input.len() < 4 {
            return None;
        }
        let selector = &input[..4];

        if to == STORAGE && selector == IRocketStorage::getAddressCall::SELECTOR {
            let call = IRocketStorage::getAddressCall::abi_decode(input).ok()?;
            let resolved = self.entries.get(&call.key).copied().unwrap_or(Address::ZERO);
            return Some(resolved.abi_encode());
        }
        if to == DEPOSIT_POOL
            && !self.revert_max_deposit
            && selector == IRocketDepositPool::getMaximumDepositAmountCall::SELECTOR
        {
            return Some(self.max_deposit.lock().unwrap().abi_encode());
        }
        None
    }
}

impl Respond for MockNode {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body["id"].clone();

        let outcome = match body["method"].as_str() {
            Some("eth_chainId") => Ok(json!(format!("0x{:x}", self.chain_id))),
            Some("eth_call") => {
                let tx = &body["params"][0];
                let to = tx["to"].as_str().and_then(|s| s.parse::<Address>().ok());
                let input = tx
                    .get("input")
                    .or_else(|| tx.get("data"))
                    .and_then(Value::as_str)
                    .and_then(|s| hex::decode(s.trim_start_matches("0x")).ok());
                match (to, input) {
                    (Some(to), Some(input)) => self
                        .eth_call(to, &input)
                        .map(|bytes| json!(format!("0x{}", hex::encode(bytes))))
                        .ok_or("execution reverted"),
                    _ => Err("malformed eth_call"),
                }
            }
            _ => Err("method not supported"),
        };

        let payload = match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(message) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": 3, "message": message }
            }),
        };

        let template = ResponseTemplate::new(200).set_body_json(payload);
        match self.delay {
            Some(delay) => template.set_delay(delay),
            None => template,
        }
    }
}
