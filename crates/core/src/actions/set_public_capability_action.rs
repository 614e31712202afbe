use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::utils::function_selector::SignatureOrSelector;
use crate::{actions::admin_action::AdminAction, bindings::roles_authority::RolesAuthority};

/// Opens (`enabled`) or closes a `(target, function)` capability to every
/// caller, regardless of roles.
pub struct SetPublicCapabilityAction {
    roles_authority: Address,
    function: SignatureOrSelector,
    call: RolesAuthority::setPublicCapabilityCall,
}

impl SetPublicCapabilityAction {
    pub fn new(
        roles_authority: Address,
        target: Address,
        function: SignatureOrSelector,
        enabled: bool,
    ) -> Self {
        let call = RolesAuthority::setPublicCapabilityCall {
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

impl AdminAction for SetPublicCapabilityAction {
    fn target(&self) -> Address {
        self.roles_authority
    }
    fn data(&self) -> Bytes {
        self.call.abi_encode().into()
    }
    fn describe(&self) -> Value {
        json!({
            "action": "SetPublicCapabilityAction",
            "roles_authority": self.roles_authority,
            "target": self.call.target,
            "function": self.function.to_string(),
            "function_selector": self.call.functionSig.to_string(),
            "public": self.call.enabled,
        })
    }
}
