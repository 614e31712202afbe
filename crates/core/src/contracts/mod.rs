pub mod auth;
pub mod dispatch;
pub mod execution;
pub mod gate;
pub mod roles_authority;

use alloy::primitives::Address;
use alloy::sol_types::SolInterface;

use self::auth::Auth;
use self::dispatch::decode_calldata;
use self::execution::Execution;
use self::gate::{AuthState, Authority};
use self::roles_authority::RolesAuthority;
use crate::bindings::auth::Auth::AuthCalls;
use crate::bindings::roles_authority::RolesAuthority::RolesAuthorityCalls;
use crate::types::revert::Revert;
use crate::utils::function_selector::Selector;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contract {
    Auth(Auth),
    RolesAuthority(RolesAuthority),
}

/// A call decoded against the surface of the contract it targets.
#[derive(Debug, PartialEq, Eq)]
pub enum Operation {
    Auth(AuthCalls),
    RolesAuthority(RolesAuthorityCalls),
}

impl Operation {
    pub fn selector(&self) -> Selector {
        match self {
            Operation::Auth(call) => call.selector().into(),
            Operation::RolesAuthority(call) => call.selector().into(),
        }
    }

    pub fn is_privileged(&self) -> bool {
        match self {
            Operation::Auth(call) => Auth::is_privileged(call),
            Operation::RolesAuthority(call) => RolesAuthority::is_privileged(call),
        }
    }
}

impl Contract {
    pub fn kind(&self) -> &'static str {
        match self {
            Contract::Auth(_) => "Auth",
            Contract::RolesAuthority(_) => "RolesAuthority",
        }
    }

    pub fn state(&self) -> &AuthState {
        match self {
            Contract::Auth(auth) => auth.state(),
            Contract::RolesAuthority(roles_authority) => roles_authority.state(),
        }
    }

    pub fn as_authority(&self) -> Option<&dyn Authority> {
        match self {
            Contract::Auth(_) => None,
            Contract::RolesAuthority(roles_authority) => Some(roles_authority),
        }
    }

    pub fn decode(&self, calldata: &[u8]) -> Result<Operation, Revert> {
        match self {
            Contract::Auth(_) => decode_calldata::<AuthCalls>(calldata).map(Operation::Auth),
            Contract::RolesAuthority(_) => {
                decode_calldata::<RolesAuthorityCalls>(calldata).map(Operation::RolesAuthority)
            }
        }
    }

    pub fn view(&self, operation: &Operation) -> Result<Vec<u8>, Revert> {
        let output = match (self, operation) {
            (Contract::Auth(auth), Operation::Auth(call)) => auth.view(call),
            (Contract::RolesAuthority(ra), Operation::RolesAuthority(call)) => ra.view(call),
            _ => {
                return Err(Revert::UnrecognizedOperation {
                    selector: operation.selector(),
                });
            }
        };
        output.ok_or(Revert::StaticCallViolation {
            selector: operation.selector(),
        })
    }

    pub(crate) fn apply(
        &mut self,
        caller: Address,
        operation: Operation,
    ) -> Result<Execution, Revert> {
        match (self, operation) {
            (Contract::Auth(auth), Operation::Auth(call)) => Ok(auth.apply(caller, call)),
            (Contract::RolesAuthority(ra), Operation::RolesAuthority(call)) => {
                Ok(ra.apply(caller, call))
            }
            (_, operation) => Err(Revert::UnrecognizedOperation {
                selector: operation.selector(),
            }),
        }
    }
}
