use alloy::primitives::{Address, Bytes};
use serde_json::Value;

/// A single privileged call, ready to be sent to `target()`.
pub trait AdminAction: Send + Sync {
    fn target(&self) -> Address;
    fn data(&self) -> Bytes; // encode to tx data
    fn describe(&self) -> Value;
}
