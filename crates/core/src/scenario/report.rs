use alloy::primitives::{Address, Log};
use alloy::sol_types::SolEvent;
use serde::Serialize;
use serde_json::{Value, json};

use crate::bindings::roles_authority::RolesAuthority;

#[derive(Serialize, Debug)]
pub struct ScenarioReport {
    pub passed: bool,
    pub steps: Vec<StepReport>,
}

#[derive(Serialize, Debug)]
pub struct StepReport {
    pub index: usize,
    pub description: Value,
    pub passed: bool,
    pub outcome: StepOutcome,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Deployed { address: Address },
    Succeeded { output: String, events: Vec<Value> },
    Reverted { reason: String },
    Checked { expected: Value, actual: Value },
}

impl ScenarioReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|step| !step.passed)
    }
}

/// Renders a log emitted by an Auth or RolesAuthority as JSON. Logs with
/// an unknown signature are rendered as raw topics and data.
pub fn describe_log(log: &Log) -> Value {
    let data = &log.data;
    let address = log.address.to_string();
    let topic0 = data.topics().first().copied().unwrap_or_default();

    let decoded = if topic0 == RolesAuthority::OwnerUpdated::SIGNATURE_HASH {
        RolesAuthority::OwnerUpdated::decode_log_data(data, true)
            .map(|e| json!({ "event": "OwnerUpdated", "user": e.user, "newOwner": e.newOwner }))
    } else if topic0 == RolesAuthority::AuthorityUpdated::SIGNATURE_HASH {
        RolesAuthority::AuthorityUpdated::decode_log_data(data, true).map(|e| {
            json!({ "event": "AuthorityUpdated", "user": e.user, "newAuthority": e.newAuthority })
        })
    } else if topic0 == RolesAuthority::UserRoleUpdated::SIGNATURE_HASH {
        RolesAuthority::UserRoleUpdated::decode_log_data(data, true).map(|e| {
            json!({ "event": "UserRoleUpdated", "user": e.user, "role": e.role, "enabled": e.enabled })
        })
    } else if topic0 == RolesAuthority::RoleCapabilityUpdated::SIGNATURE_HASH {
        RolesAuthority::RoleCapabilityUpdated::decode_log_data(data, true).map(|e| {
            json!({
                "event": "RoleCapabilityUpdated",
                "role": e.role,
                "target": e.target,
                "functionSig": e.functionSig.to_string(),
                "enabled": e.enabled,
            })
        })
    } else if topic0 == RolesAuthority::PublicCapabilityUpdated::SIGNATURE_HASH {
        RolesAuthority::PublicCapabilityUpdated::decode_log_data(data, true).map(|e| {
            json!({
                "event": "PublicCapabilityUpdated",
                "target": e.target,
                "functionSig": e.functionSig.to_string(),
                "enabled": e.enabled,
            })
        })
    } else {
        return json!({
            "address": address,
            "topics": data.topics().iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            "data": format!("0x{}", hex::encode(&data.data)),
        });
    };

    match decoded {
        Ok(mut event) => {
            event["address"] = json!(address);
            event
        }
        Err(e) => json!({ "address": address, "error": e.to_string() }),
    }
}
