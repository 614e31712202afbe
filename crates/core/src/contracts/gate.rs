use alloy::primitives::{Address, LogData};
use alloy::sol_types::SolEvent;
use log::debug;

use crate::bindings::auth::Auth;
use crate::types::revert::Revert;
use crate::utils::function_selector::Selector;

/// Anything that can answer "may `user` call `selector` on `target`".
///
/// The gate only ever talks to this trait, so an authority may itself be
/// protected by another authority without the gate knowing.
pub trait Authority {
    fn can_call(&self, user: Address, target: Address, selector: Selector) -> bool;
}

/// Owner and authority slots shared by every Auth-style contract.
///
/// A zero owner means nobody holds direct ownership; a zero authority
/// means nothing is delegated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthState {
    owner: Address,
    authority: Address,
}

impl AuthState {
    /// Builds the initial state and the two events initialization emits,
    /// both attributed to `deployer`.
    pub fn new(deployer: Address, owner: Address, authority: Address) -> (Self, Vec<LogData>) {
        let state = Self { owner, authority };
        let logs = vec![
            Auth::OwnerUpdated {
                user: deployer,
                newOwner: owner,
            }
            .encode_log_data(),
            Auth::AuthorityUpdated {
                user: deployer,
                newAuthority: authority,
            }
            .encode_log_data(),
        ];
        (state, logs)
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn authority(&self) -> Address {
        self.authority
    }

    pub(crate) fn set_owner(&mut self, caller: Address, new_owner: Address) -> LogData {
        self.owner = new_owner;
        Auth::OwnerUpdated {
            user: caller,
            newOwner: new_owner,
        }
        .encode_log_data()
    }

    pub(crate) fn set_authority(&mut self, caller: Address, new_authority: Address) -> LogData {
        self.authority = new_authority;
        Auth::AuthorityUpdated {
            user: caller,
            newAuthority: new_authority,
        }
        .encode_log_data()
    }
}

/// Admit or deny `caller` invoking `selector` on `target`.
///
/// Direct ownership is checked first, so the owner keeps access even when
/// the configured authority is missing or misbehaving. `authority` is the
/// resolved implementation behind `state.authority()`, `None` when that
/// address is zero or holds no authority.
pub fn is_authorized(
    state: &AuthState,
    authority: Option<&dyn Authority>,
    caller: Address,
    target: Address,
    selector: Selector,
) -> bool {
    if !state.owner.is_zero() && caller == state.owner {
        return true;
    }
    if state.authority.is_zero() {
        return false;
    }
    authority.is_some_and(|authority| authority.can_call(caller, target, selector))
}

/// [`is_authorized`] as a guard for privileged operations.
pub fn requires_auth(
    state: &AuthState,
    authority: Option<&dyn Authority>,
    caller: Address,
    target: Address,
    selector: Selector,
) -> Result<(), Revert> {
    if is_authorized(state, authority, caller, target, selector) {
        Ok(())
    } else {
        debug!(
            "gate: denied {} calling {} on {} (owner {}, authority {})",
            caller, selector, target, state.owner, state.authority
        );
        Err(Revert::Unauthorized {
            caller,
            target,
            selector,
        })
    }
}
