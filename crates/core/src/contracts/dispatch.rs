use alloy::sol_types::SolInterface;
use log::warn;

use crate::types::revert::Revert;
use crate::utils::function_selector::selector_of;

/// Decode calldata into the call enum of a contract surface.
///
/// Selectors outside the surface are rejected before any argument is
/// looked at. There is no fallback: an unknown selector is always an
/// error, whatever the caller.
///
/// Bytes after the arguments are ignored. The arguments themselves must
/// be canonical: every word has to re-encode to exactly what was sent, so
/// a `uint8` above 255, a `bool` other than 0/1 or an address with dirty
/// upper bytes is malformed rather than silently truncated.
pub fn decode_calldata<I: SolInterface>(calldata: &[u8]) -> Result<I, Revert> {
    let selector = selector_of(calldata);
    if calldata.len() < 4 || !I::valid_selector(selector.0) {
        warn!("dispatch: {} rejected selector {}", I::NAME, selector);
        return Err(Revert::UnrecognizedOperation { selector });
    }
    let decoded = I::abi_decode(calldata, false).map_err(|e| {
        warn!("dispatch: {} failed to decode {}: {}", I::NAME, selector, e);
        Revert::MalformedCalldata { selector }
    })?;
    if !calldata.starts_with(&decoded.abi_encode()) {
        warn!("dispatch: {} got non-canonical arguments for {}", I::NAME, selector);
        return Err(Revert::MalformedCalldata { selector });
    }
    Ok(decoded)
}
