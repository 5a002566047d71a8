use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, U256, address};
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// EVM chain identifier.
pub type ChainId = u64;

/// Ethereum mainnet.
pub const MAINNET: ChainId = 1;

/// Sentinel asset reference for the chain's native coin.
pub const NATIVE_ASSET: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Returns true if `asset` refers to the native coin rather than a token.
///
/// Both the `0xEeee…` sentinel and the zero address are accepted.
pub fn is_native_asset(asset: Address) -> bool {
    asset == NATIVE_ASSET || asset == Address::ZERO
}

/// Protocol identity. Forks sharing one interface still get distinct identifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolId {
    AaveV3,
    SparkLend,
    RocketPool,
}

impl ProtocolId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolId::AaveV3 => "aave_v3",
            ProtocolId::SparkLend => "spark_lend",
            ProtocolId::RocketPool => "rocket_pool",
        }
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aave_v3" => Ok(ProtocolId::AaveV3),
            "spark_lend" => Ok(ProtocolId::SparkLend),
            "rocket_pool" => Ok(ProtocolId::RocketPool),
            other => Err(ProtocolError::Config(format!("Unknown protocol: {other}"))),
        }
    }
}

/// Business action requested of a protocol
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Supply,
    Withdraw,
    Stake,
    Unstake,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Supply => "supply",
            Action::Withdraw => "withdraw",
            Action::Stake => "stake",
            Action::Unstake => "unstake",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supply" => Ok(Action::Supply),
            "withdraw" => Ok(Action::Withdraw),
            "stake" => Ok(Action::Stake),
            "unstake" => Ok(Action::Unstake),
            other => Err(ProtocolError::Config(format!("Unknown action: {other}"))),
        }
    }
}

/// Typed parameters for calldata generation.
///
/// Each (protocol, action) pair reads only the fields it needs; fields it
/// does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateCalldataOptions {
    pub asset: Option<Address>,
    pub amount: Option<U256>,
    pub sender: Option<Address>,
    pub recipient: Option<Address>,
    pub referral_code: Option<u16>,
}

impl GenerateCalldataOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset(mut self, asset: Address) -> Self {
        self.asset = Some(asset);
        self
    }

    pub fn amount(mut self, amount: U256) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn referral_code(mut self, code: u16) -> Self {
        self.referral_code = Some(code);
        self
    }

    pub fn require_asset(&self) -> Result<Address, ProtocolError> {
        self.asset.ok_or_else(|| ProtocolError::missing("asset"))
    }

    pub fn require_amount(&self) -> Result<U256, ProtocolError> {
        self.amount.ok_or_else(|| ProtocolError::missing("amount"))
    }

    pub fn require_sender(&self) -> Result<Address, ProtocolError> {
        self.sender.ok_or_else(|| ProtocolError::missing("sender"))
    }

    pub fn require_recipient(&self) -> Result<Address, ProtocolError> {
        self.recipient.ok_or_else(|| ProtocolError::missing("recipient"))
    }
}

/// Parse a token amount from decimal or `0x`-prefixed hex text.
///
/// Negative values and values wider than 256 bits are rejected rather than
/// truncated.
pub fn parse_amount(text: &str) -> Result<U256, ProtocolError> {
    let text = text.trim();
    let invalid = |reason: String| ProtocolError::InvalidOption {
        field: "amount",
        reason,
    };

    if text.starts_with('-') {
        return Err(invalid(format!("must not be negative, got '{text}'")));
    }
    let (digits, radix) = match text.strip_prefix("0x") {
        Some(digits) => (digits, 16),
        None => (text, 10),
    };
    if digits.is_empty() {
        return Err(invalid("empty amount".into()));
    }
    U256::from_str_radix(digits, radix)
        .map_err(|e| invalid(format!("'{text}' is not an unsigned 256-bit integer: {e}")))
}
