use alloy::primitives::{Address, Bytes};
use serde_json::{Value, json};

use crate::actions::admin_action::AdminAction;
use crate::utils::function_selector::selector_of;

/// Arbitrary calldata, used to probe how a contract handles selectors it
/// does not recognize.
pub struct RawCallAction {
    target: Address,
    data: Bytes,
}

impl RawCallAction {
    pub fn new(target: Address, data: Bytes) -> Self {
        Self { target, data }
    }
}

impl AdminAction for RawCallAction {
    fn target(&self) -> Address {
        self.target
    }
    fn data(&self) -> Bytes {
        self.data.clone()
    }
    fn describe(&self) -> Value {
        json!({
            "action": "RawCallAction",
            "target": self.target.to_string(),
            "selector": selector_of(&self.data).to_string(),
            "data": format!("0x{}", hex::encode(&self.data)),
        })
    }
}
