pub mod actions;
pub mod bindings;
pub mod chain;
pub mod contracts;
pub mod scenario;
pub mod types;
pub mod utils;

pub use chain::chain::Chain;
pub use contracts::gate::{AuthState, Authority, is_authorized, requires_auth};
pub use types::{revert::Revert, role_set::RoleSet};

use actions::action_spec::ActionSpec;
use alloy::primitives::Address;
use eyre::Result;
use scenario::report::ScenarioReport;
use scenario::scenario::{ScenarioRunner, parse_steps_from_str};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs;

/// Loads a scenario file and runs it against a fresh chain.
pub fn run_scenario_file(path: &str) -> Result<ScenarioReport> {
    let content = fs::read_to_string(path)?;
    let steps = parse_steps_from_str(&content)?;
    ScenarioRunner::new().run(&steps)
}

/// Encodes a single JSON described action aimed at `contract`.
pub fn encode_action(contract: Address, action_json: &str) -> Result<Value> {
    let spec: ActionSpec = serde_json::from_str(action_json)?;
    let action = spec.into_action(contract, &HashMap::new())?;
    Ok(json!({
        "to": action.target(),
        "data": format!("0x{}", hex::encode(action.data())),
        "description": action.describe(),
    }))
}
