use alloy::primitives::Address;
use thiserror::Error;

use crate::utils::function_selector::Selector;

/// Why a call against a contract failed. A reverted call commits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Revert {
    #[error("UNAUTHORIZED: {caller} may not call {selector} on {target}")]
    Unauthorized {
        caller: Address,
        target: Address,
        selector: Selector,
    },
    #[error("unrecognized selector {selector}")]
    UnrecognizedOperation { selector: Selector },
    #[error("malformed calldata for selector {selector}")]
    MalformedCalldata { selector: Selector },
    #[error("malformed return data for selector {selector}")]
    MalformedReturnData { selector: Selector },
    #[error("selector {selector} writes state and cannot be used in a static call")]
    StaticCallViolation { selector: Selector },
    #[error("no contract deployed at {0}")]
    NoContract(Address),
    #[error("a contract is already deployed at {0}")]
    AlreadyDeployed(Address),
}
