pub mod error;
pub mod types;
pub mod calldata;
pub mod context;
pub mod config;
pub mod contracts;
pub mod chain;
pub mod address_book;
pub mod operations;
pub mod registry;

pub use calldata::{HEX_PREFIX, decode_calldata};
pub use context::CallContext;
pub use error::ProtocolError;
pub use operations::aave::{AaveFork, AaveOperation};
pub use operations::rocket_pool::RocketPoolOperation;
pub use operations::{PreparedCall, ProtocolOperation, prepare_call};
pub use registry::{OperationKey, ProtocolRegistry};
pub use types::*;
