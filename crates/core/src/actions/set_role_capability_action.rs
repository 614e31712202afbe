use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::utils::function_selector::SignatureOrSelector;
use crate::{actions::admin_action::AdminAction, bindings::roles_authority::RolesAuthority};

/// Adds `role` to, or removes it from, the roles allowed to call
/// `function` on `target`.
pub struct SetRoleCapabilityAction {
    roles_authority: Address,
    function: SignatureOrSelector,
    call: RolesAuthority::setRoleCapabilityCall,
}

impl SetRoleCapabilityAction {
    pub fn new(
        roles_authority: Address,
        role: u8,
        target: Address,
        function: SignatureOrSelector,
        enabled: bool,
    ) -> Self {
        let call = RolesAuthority::setRoleCapabilityCall {
            role,
            target,
            functionSig: function.selector(),
            enabled,
        };
        Self {
            roles_authority,
            function,
            call,
        }
    }
}

impl AdminAction for SetRoleCapabilityAction {
    fn target(&self) -> Address {
        self.roles_authority
    }
    fn data(&self) -> Bytes {
        self.call.abi_encode().into()
    }
    fn describe(&self) -> Value {
        json!({
            "action": "SetRoleCapabilityAction",
            "roles_authority": self.roles_authority,
            "role": self.call.role,
            "target": self.call.target,
            "function": self.function.to_string(),
            "function_selector": self.call.functionSig.to_string(),
            "change": if self.call.enabled { "grant" } else { "revoke" },
        })
    }
}
