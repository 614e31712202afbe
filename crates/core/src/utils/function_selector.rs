use alloy::primitives::{FixedBytes, keccak256};
use serde::{Deserialize, Deserializer, de::Error};
use std::fmt;

pub type Selector = FixedBytes<4>;

/// First four bytes of keccak256 over a canonical signature such as
/// `setAuthority(address)`.
pub fn selector_from_signature(signature: &str) -> Selector {
    Selector::from_slice(&keccak256(signature.as_bytes())[..4])
}

/// Selector addressed by a call. Calldata shorter than four bytes is
/// zero padded, it never matches a recognized operation.
pub fn selector_of(calldata: &[u8]) -> Selector {
    let mut selector = [0u8; 4];
    let len = calldata.len().min(4);
    selector[..len].copy_from_slice(&calldata[..len]);
    Selector::from(selector)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignatureOrSelector {
    Signature(String),
    Selector(Selector),
}

impl<'de> Deserialize<'de> for SignatureOrSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl std::str::FromStr for SignatureOrSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") {
            return s
                .parse::<Selector>()
                .map(SignatureOrSelector::Selector)
                .map_err(|_| format!("Invalid selector: {s} is not 4 bytes of hex"));
        }
        if s.contains('(') && s.ends_with(')') {
            Ok(SignatureOrSelector::Signature(s.to_string()))
        } else {
            Err(format!(
                "Invalid function: {s} is neither a 0x selector nor a signature like name(type,...)"
            ))
        }
    }
}

impl SignatureOrSelector {
    pub fn selector(&self) -> Selector {
        match self {
            SignatureOrSelector::Signature(signature) => selector_from_signature(signature),
            SignatureOrSelector::Selector(selector) => *selector,
        }
    }
}

impl fmt::Display for SignatureOrSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureOrSelector::Signature(signature) => f.write_str(signature),
            SignatureOrSelector::Selector(selector) => write!(f, "{selector}"),
        }
    }
}
