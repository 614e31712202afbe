use alloy::primitives::{Address, LogData};
use alloy::sol_types::{SolCall, SolEvent};
use std::collections::{HashMap, HashSet};

use super::execution::Execution;
use super::gate::{AuthState, Authority};
use crate::bindings::roles_authority::RolesAuthority as Abi;
use crate::bindings::roles_authority::RolesAuthority::RolesAuthorityCalls;
use crate::types::role_set::RoleSet;
use crate::utils::function_selector::Selector;

/// Role based [`Authority`] with up to 256 roles.
///
/// Users map to a [`RoleSet`] of held roles, each `(target, selector)`
/// capability maps to the [`RoleSet`] allowed to call it, and a capability
/// may additionally be public. Empty sets and disabled public flags are
/// not stored, so two instances with the same grants compare equal no
/// matter the order they were granted and revoked in.
///
/// A `RolesAuthority` is itself Auth-protected: its mutators go through
/// the gate of its own [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolesAuthority {
    state: AuthState,
    user_roles: HashMap<Address, RoleSet>,
    role_capabilities: HashMap<(Address, Selector), RoleSet>,
    public_capabilities: HashSet<(Address, Selector)>,
}

impl RolesAuthority {
    pub fn new(state: AuthState) -> Self {
        Self {
            state,
            user_roles: HashMap::new(),
            role_capabilities: HashMap::new(),
            public_capabilities: HashSet::new(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user_roles(&self, user: Address) -> RoleSet {
        self.user_roles.get(&user).copied().unwrap_or_default()
    }

    pub fn roles_with_capability(&self, target: Address, selector: Selector) -> RoleSet {
        self.role_capabilities
            .get(&(target, selector))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_capability_public(&self, target: Address, selector: Selector) -> bool {
        self.public_capabilities.contains(&(target, selector))
    }

    pub fn has_role(&self, user: Address, role: u8) -> bool {
        self.user_roles(user).contains(role)
    }

    pub fn does_role_have_capability(&self, role: u8, target: Address, selector: Selector) -> bool {
        self.roles_with_capability(target, selector).contains(role)
    }

    pub(crate) fn set_user_role(&mut self, user: Address, role: u8, enabled: bool) -> LogData {
        let roles = self.user_roles(user).with(role, enabled);
        if roles.is_empty() {
            self.user_roles.remove(&user);
        } else {
            self.user_roles.insert(user, roles);
        }
        Abi::UserRoleUpdated {
            user,
            role,
            enabled,
        }
        .encode_log_data()
    }

    pub(crate) fn set_role_capability(
        &mut self,
        role: u8,
        target: Address,
        selector: Selector,
        enabled: bool,
    ) -> LogData {
        let roles = self
            .roles_with_capability(target, selector)
            .with(role, enabled);
        if roles.is_empty() {
            self.role_capabilities.remove(&(target, selector));
        } else {
            self.role_capabilities.insert((target, selector), roles);
        }
        Abi::RoleCapabilityUpdated {
            role,
            target,
            functionSig: selector,
            enabled,
        }
        .encode_log_data()
    }

    pub(crate) fn set_public_capability(
        &mut self,
        target: Address,
        selector: Selector,
        enabled: bool,
    ) -> LogData {
        if enabled {
            self.public_capabilities.insert((target, selector));
        } else {
            self.public_capabilities.remove(&(target, selector));
        }
        Abi::PublicCapabilityUpdated {
            target,
            functionSig: selector,
            enabled,
        }
        .encode_log_data()
    }

    pub fn is_privileged(call: &RolesAuthorityCalls) -> bool {
        matches!(
            call,
            RolesAuthorityCalls::setOwner(_)
                | RolesAuthorityCalls::setAuthority(_)
                | RolesAuthorityCalls::setPublicCapability(_)
                | RolesAuthorityCalls::setRoleCapability(_)
                | RolesAuthorityCalls::setUserRole(_)
        )
    }

    /// Answers the read-only part of the surface, `None` for mutators.
    pub fn view(&self, call: &RolesAuthorityCalls) -> Option<Vec<u8>> {
        let output = match call {
            RolesAuthorityCalls::owner(_) => {
                Abi::ownerCall::abi_encode_returns(&(self.state.owner(),))
            }
            RolesAuthorityCalls::authority(_) => {
                Abi::authorityCall::abi_encode_returns(&(self.state.authority(),))
            }
            RolesAuthorityCalls::hasRole(c) => {
                Abi::hasRoleCall::abi_encode_returns(&(self.has_role(c.user, c.role),))
            }
            RolesAuthorityCalls::doesRoleHaveCapability(c) => {
                Abi::doesRoleHaveCapabilityCall::abi_encode_returns(&(self
                    .does_role_have_capability(c.role, c.target, c.functionSig),))
            }
            RolesAuthorityCalls::canCall(c) => Abi::canCallCall::abi_encode_returns(&(self
                .can_call(c.user, c.target, c.functionSig),)),
            RolesAuthorityCalls::getUserRoles(c) => {
                Abi::getUserRolesCall::abi_encode_returns(&(self.user_roles(c.user).to_b256(),))
            }
            RolesAuthorityCalls::getRolesWithCapability(c) => {
                Abi::getRolesWithCapabilityCall::abi_encode_returns(&(self
                    .roles_with_capability(c.target, c.functionSig)
                    .to_b256(),))
            }
            RolesAuthorityCalls::isCapabilityPublic(c) => {
                Abi::isCapabilityPublicCall::abi_encode_returns(&(self
                    .is_capability_public(c.target, c.functionSig),))
            }
            RolesAuthorityCalls::setOwner(_)
            | RolesAuthorityCalls::setAuthority(_)
            | RolesAuthorityCalls::setPublicCapability(_)
            | RolesAuthorityCalls::setRoleCapability(_)
            | RolesAuthorityCalls::setUserRole(_) => return None,
        };
        Some(output)
    }

    /// Runs `call` as `caller`. Gating happens before this is reached.
    pub(crate) fn apply(&mut self, caller: Address, call: RolesAuthorityCalls) -> Execution {
        match call {
            RolesAuthorityCalls::setOwner(c) => {
                Execution::logged(self.state.set_owner(caller, c.newOwner))
            }
            RolesAuthorityCalls::setAuthority(c) => {
                Execution::logged(self.state.set_authority(caller, c.newAuthority))
            }
            RolesAuthorityCalls::setPublicCapability(c) => {
                Execution::logged(self.set_public_capability(c.target, c.functionSig, c.enabled))
            }
            RolesAuthorityCalls::setRoleCapability(c) => Execution::logged(
                self.set_role_capability(c.role, c.target, c.functionSig, c.enabled),
            ),
            RolesAuthorityCalls::setUserRole(c) => {
                Execution::logged(self.set_user_role(c.user, c.role, c.enabled))
            }
            read => Execution::output(self.view(&read).unwrap_or_default()),
        }
    }
}

impl Authority for RolesAuthority {
    fn can_call(&self, user: Address, target: Address, selector: Selector) -> bool {
        self.is_capability_public(target, selector)
            || self
                .user_roles(user)
                .intersects(&self.roles_with_capability(target, selector))
    }
}
