use alloy::primitives::Address;
use alloy::sol_types::SolCall;

use super::execution::Execution;
use super::gate::AuthState;
use crate::bindings::auth::Auth as Abi;
use crate::bindings::auth::Auth::AuthCalls;

/// A contract whose only surface is ownership and authority management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    state: AuthState,
}

impl Auth {
    pub fn new(state: AuthState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_privileged(call: &AuthCalls) -> bool {
        matches!(call, AuthCalls::setOwner(_) | AuthCalls::setAuthority(_))
    }

    /// Answers the read-only part of the surface, `None` for mutators.
    pub fn view(&self, call: &AuthCalls) -> Option<Vec<u8>> {
        match call {
            AuthCalls::owner(_) => Some(Abi::ownerCall::abi_encode_returns(&(self.state.owner(),))),
            AuthCalls::authority(_) => Some(Abi::authorityCall::abi_encode_returns(&(
                self.state.authority(),
            ))),
            AuthCalls::setOwner(_) | AuthCalls::setAuthority(_) => None,
        }
    }

    /// Runs `call` as `caller`. Gating happens before this is reached.
    pub(crate) fn apply(&mut self, caller: Address, call: AuthCalls) -> Execution {
        match call {
            AuthCalls::setOwner(call) => Execution::logged(self.state.set_owner(caller, call.newOwner)),
            AuthCalls::setAuthority(call) => {
                Execution::logged(self.state.set_authority(caller, call.newAuthority))
            }
            read => Execution::output(self.view(&read).unwrap_or_default()),
        }
    }
}
