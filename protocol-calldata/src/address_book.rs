//! Resolution of Rocket Pool network contracts through RocketStorage.
//!
//! Network contracts are upgraded in place by re-pointing their RocketStorage
//! entry, so their addresses must be read from the chain rather than pinned.

use alloy::primitives::{Address, B256, address, keccak256};
use alloy::providers::RootProvider;
use tracing::debug;

use crate::context::CallContext;
use crate::contracts::IRocketStorage;
use crate::error::ProtocolError;

/// Canonical RocketStorage on Ethereum mainnet
pub const MAINNET_ROCKET_STORAGE: Address = address!("0x1d8f8f00cfa6758d7bE78336684788Fb0ee0Fa46");

/// RocketStorage key under which a network contract's address is stored:
/// `keccak256("contract.address" ++ name)`.
pub fn contract_address_key(name: &str) -> B256 {
    keccak256([b"contract.address".as_slice(), name.as_bytes()].concat())
}

/// Read-only handle on the RocketStorage address book.
pub struct AddressBook {
    storage: IRocketStorage::IRocketStorageInstance<RootProvider>,
}

impl AddressBook {
    pub fn new(storage_address: Address, provider: RootProvider) -> Self {
        Self {
            storage: IRocketStorage::new(storage_address, provider),
        }
    }

    pub fn storage_address(&self) -> Address {
        *self.storage.address()
    }

    /// Look up the current address of the network contract `name`.
    ///
    /// An unset entry (zero address) is a resolution failure.
    pub async fn resolve(&self, ctx: &CallContext, name: &str) -> Result<Address, ProtocolError> {
        let key = contract_address_key(name);
        let address = ctx
            .run("getAddress", async { self.storage.getAddress(key).call().await })
            .await
            .map_err(|e| match e {
                ProtocolError::Rpc(reason) => ProtocolError::Resolution {
                    contract: name.to_string(),
                    reason,
                },
                other => other,
            })?;

        if address.is_zero() {
            return Err(ProtocolError::Resolution {
                contract: name.to_string(),
                reason: format!(
                    "address book {} has no entry for it",
                    self.storage_address()
                ),
            });
        }

        debug!(contract = name, %address, "resolved network contract");
        Ok(address)
    }
}
