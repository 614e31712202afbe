use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{actions::admin_action::AdminAction, bindings::auth::Auth};

pub struct SetAuthorityAction {
    auth: Address,
    new_authority: Address,
}

impl SetAuthorityAction {
    pub fn new(auth: Address, new_authority: Address) -> Self {
        Self {
            auth,
            new_authority,
        }
    }
}

impl AdminAction for SetAuthorityAction {
    fn target(&self) -> Address {
        self.auth
    }
    fn data(&self) -> Bytes {
        let bytes_data = Auth::setAuthorityCall::new((self.new_authority,)).abi_encode();
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": "SetAuthorityAction",
            "auth": self.auth.to_string(),
            "new_authority": self.new_authority.to_string(),
        })
    }
}
