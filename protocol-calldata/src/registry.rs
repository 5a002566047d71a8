//! Lookup of protocol operations by (protocol, action, chain).
//!
//! The registry is an ordinary value: build one at startup, hand it to
//! every operation's `register`, then share it by reference. The map is
//! concurrent, so late registrations may race lookups safely.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::warn;

use crate::error::ProtocolError;
use crate::operations::ProtocolOperation;
use crate::types::{Action, ChainId, ProtocolId};

/// Composite registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationKey {
    pub protocol: ProtocolId,
    pub action: Action,
    pub chain_id: ChainId,
}

#[derive(Default)]
pub struct ProtocolRegistry {
    operations: DashMap<OperationKey, Arc<dyn ProtocolOperation>>,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `operation` under (protocol, action, chain).
    ///
    /// Last write wins: an existing entry for the same key is replaced and
    /// returned.
    pub fn register(
        &self,
        protocol: ProtocolId,
        action: Action,
        chain_id: ChainId,
        operation: Arc<dyn ProtocolOperation>,
    ) -> Option<Arc<dyn ProtocolOperation>> {
        let key = OperationKey {
            protocol,
            action,
            chain_id,
        };
        let previous = self.operations.insert(key, operation);
        if previous.is_some() {
            warn!(%protocol, %action, chain_id, "replaced registered protocol operation");
        }
        previous
    }

    /// Look up the operation for (protocol, action, chain). `None` simply
    /// means the combination is not served.
    pub fn resolve(
        &self,
        protocol: ProtocolId,
        action: Action,
        chain_id: ChainId,
    ) -> Option<Arc<dyn ProtocolOperation>> {
        let key = OperationKey {
            protocol,
            action,
            chain_id,
        };
        self.operations.get(&key).map(|entry| entry.value().clone())
    }

    /// Like [`resolve`](Self::resolve), but absence is an error.
    pub fn require(
        &self,
        protocol: ProtocolId,
        action: Action,
        chain_id: ChainId,
    ) -> Result<Arc<dyn ProtocolOperation>, ProtocolError> {
        self.resolve(protocol, action, chain_id)
            .ok_or(ProtocolError::NotRegistered {
                protocol,
                action,
                chain_id,
            })
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn keys(&self) -> Vec<OperationKey> {
        self.operations.iter().map(|entry| *entry.key()).collect()
    }
}

impl fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
