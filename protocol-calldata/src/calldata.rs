//! Hex rendering and parsing of ABI-encoded calldata.

use alloy::sol_types::SolCall;

use crate::error::ProtocolError;

/// Conventional hex marker of EVM chains.
pub const HEX_PREFIX: &str = "0x";

/// ABI-encode a call and render it as `0x`-prefixed lowercase hex.
pub fn encode_call<C: SolCall>(call: &C) -> String {
    to_hex(&call.abi_encode())
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("{HEX_PREFIX}{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed calldata back into the typed call `C`.
///
/// The selector must match `C`; malformed hex or argument words are
/// reported as an encoding error naming the function.
pub fn decode_calldata<C: SolCall>(calldata: &str) -> Result<C, ProtocolError> {
    let encoding_error = |reason: String| ProtocolError::Encoding {
        function: C::SIGNATURE.to_string(),
        reason,
    };

    let stripped = calldata
        .strip_prefix(HEX_PREFIX)
        .ok_or_else(|| encoding_error(format!("missing {HEX_PREFIX} prefix")))?;
    let bytes = hex::decode(stripped).map_err(|e| encoding_error(format!("invalid hex: {e}")))?;

    if bytes.len() < 4 {
        return Err(encoding_error(format!(
            "calldata must hold a 4-byte selector, got {} bytes",
            bytes.len()
        )));
    }
    if bytes[..4] != C::SELECTOR {
        return Err(encoding_error(format!(
            "selector mismatch: expected 0x{}, got 0x{}",
            hex::encode(C::SELECTOR),
            hex::encode(&bytes[..4])
        )));
    }

    C::abi_decode(&bytes).map_err(|e| encoding_error(e.to_string()))
}
