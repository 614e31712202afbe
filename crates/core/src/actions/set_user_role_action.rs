use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{actions::admin_action::AdminAction, bindings::roles_authority::RolesAuthority};

/// Grants (`enabled`) or revokes one role bit of `user`.
pub struct SetUserRoleAction {
    roles_authority: Address,
    call: RolesAuthority::setUserRoleCall,
}

impl SetUserRoleAction {
    pub fn new(roles_authority: Address, user: Address, role: u8, enabled: bool) -> Self {
        Self {
            roles_authority,
            call: RolesAuthority::setUserRoleCall {
                user,
                role,
                enabled,
            },
        }
    }
}

impl AdminAction for SetUserRoleAction {
    fn target(&self) -> Address {
        self.roles_authority
    }
    fn data(&self) -> Bytes {
        self.call.abi_encode().into()
    }
    fn describe(&self) -> Value {
        json!({
            "action": "SetUserRoleAction",
            "roles_authority": self.roles_authority,
            "user": self.call.user,
            "role": self.call.role,
            "change": if self.call.enabled { "grant" } else { "revoke" },
        })
    }
}
