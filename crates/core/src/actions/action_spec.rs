use alloy::primitives::{Address, Bytes};
use eyre::Result;
use serde::Deserialize;
use std::collections::HashMap;

use super::{
    admin_action::AdminAction, raw_call_action::RawCallAction,
    set_authority_action::SetAuthorityAction, set_owner_action::SetOwnerAction,
    set_public_capability_action::SetPublicCapabilityAction,
    set_role_capability_action::SetRoleCapabilityAction, set_user_role_action::SetUserRoleAction,
};
use crate::utils::address_or_label::AddressOrLabel;
use crate::utils::function_selector::SignatureOrSelector;

/// JSON form of an admin action, e.g.
/// `{ "SetUserRole": { "user": "0x..", "role": 1, "enabled": true } }`.
/// The contract the action is sent to is supplied separately.
#[derive(Deserialize, Debug, Clone)]
pub enum ActionSpec {
    SetOwner {
        new_owner: AddressOrLabel,
    },
    SetAuthority {
        new_authority: AddressOrLabel,
    },
    SetUserRole {
        user: AddressOrLabel,
        role: u8,
        enabled: bool,
    },
    SetRoleCapability {
        role: u8,
        target: AddressOrLabel,
        function: SignatureOrSelector,
        enabled: bool,
    },
    SetPublicCapability {
        target: AddressOrLabel,
        function: SignatureOrSelector,
        enabled: bool,
    },
    Raw {
        data: Bytes,
    },
}

impl ActionSpec {
    pub fn into_action(
        &self,
        contract: Address,
        labels: &HashMap<String, Address>,
    ) -> Result<Box<dyn AdminAction>> {
        let action: Box<dyn AdminAction> = match self {
            ActionSpec::SetOwner { new_owner } => {
                Box::new(SetOwnerAction::new(contract, new_owner.resolve(labels)?))
            }
            ActionSpec::SetAuthority { new_authority } => Box::new(SetAuthorityAction::new(
                contract,
                new_authority.resolve(labels)?,
            )),
            ActionSpec::SetUserRole {
                user,
                role,
                enabled,
            } => Box::new(SetUserRoleAction::new(
                contract,
                user.resolve(labels)?,
                *role,
                *enabled,
            )),
            ActionSpec::SetRoleCapability {
                role,
                target,
                function,
                enabled,
            } => Box::new(SetRoleCapabilityAction::new(
                contract,
                *role,
                target.resolve(labels)?,
                function.clone(),
                *enabled,
            )),
            ActionSpec::SetPublicCapability {
                target,
                function,
                enabled,
            } => Box::new(SetPublicCapabilityAction::new(
                contract,
                target.resolve(labels)?,
                function.clone(),
                *enabled,
            )),
            ActionSpec::Raw { data } => Box::new(RawCallAction::new(contract, data.clone())),
        };
        Ok(action)
    }
}
