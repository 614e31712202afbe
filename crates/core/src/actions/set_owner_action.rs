use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use crate::{actions::admin_action::AdminAction, bindings::auth::Auth};

pub struct SetOwnerAction {
    auth: Address,
    new_owner: Address,
}

impl SetOwnerAction {
    pub fn new(auth: Address, new_owner: Address) -> Self {
        Self { auth, new_owner }
    }
}

impl AdminAction for SetOwnerAction {
    fn target(&self) -> Address {
        self.auth
    }
    fn data(&self) -> Bytes {
        let bytes_data = Auth::setOwnerCall::new((self.new_owner,)).abi_encode();
        Bytes::from(bytes_data)
    }
    fn describe(&self) -> Value {
        json!({
            "action": "SetOwnerAction",
            "auth": self.auth.to_string(),
            "new_owner": self.new_owner.to_string(),
        })
    }
}
