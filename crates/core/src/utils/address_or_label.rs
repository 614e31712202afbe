use alloy::primitives::Address;
use eyre::{Result, eyre};
use serde::{Deserialize, Deserializer, de::Error};
use std::collections::HashMap;

/// A contract reference in a scenario: either a literal address or the
/// label given to an earlier deployment.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressOrLabel {
    Address(Address),
    Label(String),
}

impl<'de> Deserialize<'de> for AddressOrLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // Try to parse as Address first
        if let Ok(addr) = s.parse::<Address>() {
            Ok(AddressOrLabel::Address(addr))
        } else if s.starts_with("0x") {
            Err(D::Error::custom(
                "Invalid address: string starts with '0x' but is not a valid address (possible typo or wrong length)",
            ))
        } else {
            Ok(AddressOrLabel::Label(s))
        }
    }
}

impl From<Address> for AddressOrLabel {
    fn from(address: Address) -> Self {
        AddressOrLabel::Address(address)
    }
}

impl AddressOrLabel {
    pub fn resolve(&self, labels: &HashMap<String, Address>) -> Result<Address> {
        match self {
            AddressOrLabel::Address(addr) => Ok(*addr),
            AddressOrLabel::Label(label) => labels
                .get(label)
                .copied()
                .ok_or_else(|| eyre!("address_or_label: unknown label {}", label)),
        }
    }
}
