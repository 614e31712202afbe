// Runs JSON described sequences of deployments, calls and expectations
// against a fresh in-memory chain.

use super::report::{ScenarioReport, StepOutcome, StepReport, describe_log};
use crate::actions::action_spec::ActionSpec;
use crate::bindings::auth::Auth;
use crate::bindings::roles_authority::RolesAuthority;
use crate::chain::chain::Chain;
use crate::types::revert::Revert;
use crate::utils::address_or_label::AddressOrLabel;
use crate::utils::function_selector::SignatureOrSelector;
use alloy::primitives::{Address, address};
use eyre::{Result, eyre};
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Deployer used when a deploy step does not name one.
pub const DEFAULT_DEPLOYER: Address = address!("0xe2e2e2e2e2e2e2e2e2e2e2e2e2e2e2e2e2e2e2e2");

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum ContractKind {
    Auth,
    RolesAuthority,
}

#[derive(Deserialize, Debug)]
pub struct DeployStep {
    pub label: String,
    pub kind: ContractKind,
    #[serde(default)]
    pub deployer: Option<Address>,
    pub owner: AddressOrLabel,
    #[serde(default)]
    pub authority: Option<AddressOrLabel>,
    #[serde(default)]
    pub at: Option<Address>,
}

#[derive(Deserialize, Debug)]
pub struct CallStep {
    pub caller: AddressOrLabel,
    pub contract: AddressOrLabel,
    pub action: ActionSpec,
    #[serde(default)]
    pub expect_revert: bool,
}

#[derive(Deserialize, Debug)]
pub enum Expectation {
    Owner {
        contract: AddressOrLabel,
        equals: AddressOrLabel,
    },
    Authority {
        contract: AddressOrLabel,
        equals: AddressOrLabel,
    },
    CanCall {
        authority: AddressOrLabel,
        user: AddressOrLabel,
        target: AddressOrLabel,
        function: SignatureOrSelector,
        equals: bool,
    },
    HasRole {
        authority: AddressOrLabel,
        user: AddressOrLabel,
        role: u8,
        equals: bool,
    },
    DoesRoleHaveCapability {
        authority: AddressOrLabel,
        role: u8,
        target: AddressOrLabel,
        function: SignatureOrSelector,
        equals: bool,
    },
    LogCount {
        equals: usize,
    },
}

#[derive(Deserialize, Debug)]
pub enum Step {
    Deploy(DeployStep),
    Call(CallStep),
    Expect(Expectation),
}

pub fn parse_steps_from_str(json_str: &str) -> Result<Vec<Step>> {
    Ok(serde_json::from_str(json_str)?)
}

pub fn parse_steps_from_value(value: Value) -> Result<Vec<Step>> {
    let array = value
        .as_array()
        .ok_or(eyre!("scenario: expected a JSON array of steps"))?;
    array
        .iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item.clone()).map_err(|e| eyre!("scenario: step {}: {}", i, e))
        })
        .collect()
}

#[derive(Default)]
pub struct ScenarioRunner {
    chain: Chain,
    labels: HashMap<String, Address>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every step in order. Failed calls and expectations are
    /// recorded in the report; malformed steps (unknown labels, occupied
    /// deploy addresses) abort the run.
    pub fn run(&mut self, steps: &[Step]) -> Result<ScenarioReport> {
        let mut reports = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let report = self
                .run_step(index, step)
                .map_err(|e| eyre!("scenario: step {} failed to run: {}", index, e))?;
            if !report.passed {
                info!("scenario: step {} did not pass: {:?}", index, report.outcome);
            }
            reports.push(report);
        }

        Ok(ScenarioReport {
            passed: reports.iter().all(|r| r.passed),
            steps: reports,
        })
    }

    fn run_step(&mut self, index: usize, step: &Step) -> Result<StepReport> {
        match step {
            Step::Deploy(deploy) => self.deploy(index, deploy),
            Step::Call(call) => self.call(index, call),
            Step::Expect(expectation) => self.expect(index, expectation),
        }
    }

    fn resolve(&self, value: &AddressOrLabel) -> Result<Address> {
        value.resolve(&self.labels)
    }

    fn deploy(&mut self, index: usize, deploy: &DeployStep) -> Result<StepReport> {
        if self.labels.contains_key(&deploy.label) {
            return Err(eyre!("label {} is already in use", deploy.label));
        }
        let deployer = deploy.deployer.unwrap_or(DEFAULT_DEPLOYER);
        let owner = self.resolve(&deploy.owner)?;
        let authority = match &deploy.authority {
            Some(authority) => self.resolve(authority)?,
            None => Address::ZERO,
        };

        let address = match (deploy.kind, deploy.at) {
            (ContractKind::Auth, None) => self.chain.deploy_auth(deployer, owner, authority),
            (ContractKind::Auth, Some(at)) => {
                self.chain.deploy_auth_at(at, deployer, owner, authority)?
            }
            (ContractKind::RolesAuthority, None) => {
                self.chain
                    .deploy_roles_authority(deployer, owner, authority)
            }
            (ContractKind::RolesAuthority, Some(at)) => self
                .chain
                .deploy_roles_authority_at(at, deployer, owner, authority)?,
        };
        self.labels.insert(deploy.label.clone(), address);

        Ok(StepReport {
            index,
            description: json!({
                "step": "Deploy",
                "label": deploy.label,
                "kind": format!("{:?}", deploy.kind),
                "owner": owner,
                "authority": authority,
            }),
            passed: true,
            outcome: StepOutcome::Deployed { address },
        })
    }

    fn call(&mut self, index: usize, step: &CallStep) -> Result<StepReport> {
        let caller = self.resolve(&step.caller)?;
        let contract = self.resolve(&step.contract)?;
        let action = step.action.into_action(contract, &self.labels)?;

        let logs_before = self.chain.logs().len();
        let outcome = match self.chain.call(caller, action.target(), &action.data()) {
            Ok(output) => StepOutcome::Succeeded {
                output: format!("0x{}", hex::encode(&output)),
                events: self.chain.logs()[logs_before..]
                    .iter()
                    .map(describe_log)
                    .collect(),
            },
            Err(revert) => StepOutcome::Reverted {
                reason: revert.to_string(),
            },
        };
        let reverted = matches!(outcome, StepOutcome::Reverted { .. });
        debug!("scenario: step {} call by {} reverted: {}", index, caller, reverted);

        Ok(StepReport {
            index,
            description: json!({
                "step": "Call",
                "caller": caller,
                "action": action.describe(),
                "expect_revert": step.expect_revert,
            }),
            passed: reverted == step.expect_revert,
            outcome,
        })
    }

    fn expect(&self, index: usize, expectation: &Expectation) -> Result<StepReport> {
        let (description, expected, actual) = match expectation {
            Expectation::Owner { contract, equals } => {
                let contract = self.resolve(contract)?;
                let actual = self
                    .chain
                    .view(contract, &Auth::ownerCall {})
                    .map(|r| json!(r._0));
                (
                    json!({ "step": "Expect", "check": "owner", "contract": contract }),
                    json!(self.resolve(equals)?),
                    actual,
                )
            }
            Expectation::Authority { contract, equals } => {
                let contract = self.resolve(contract)?;
                let actual = self
                    .chain
                    .view(contract, &Auth::authorityCall {})
                    .map(|r| json!(r._0));
                (
                    json!({ "step": "Expect", "check": "authority", "contract": contract }),
                    json!(self.resolve(equals)?),
                    actual,
                )
            }
            Expectation::CanCall {
                authority,
                user,
                target,
                function,
                equals,
            } => {
                let authority = self.resolve(authority)?;
                let call = RolesAuthority::canCallCall {
                    user: self.resolve(user)?,
                    target: self.resolve(target)?,
                    functionSig: function.selector(),
                };
                let actual = self.chain.view(authority, &call).map(|r| json!(r._0));
                (
                    json!({
                        "step": "Expect",
                        "check": "canCall",
                        "authority": authority,
                        "user": call.user,
                        "target": call.target,
                        "function": function.to_string(),
                    }),
                    json!(equals),
                    actual,
                )
            }
            Expectation::HasRole {
                authority,
                user,
                role,
                equals,
            } => {
                let authority = self.resolve(authority)?;
                let call = RolesAuthority::hasRoleCall {
                    user: self.resolve(user)?,
                    role: *role,
                };
                let actual = self.chain.view(authority, &call).map(|r| json!(r._0));
                (
                    json!({
                        "step": "Expect",
                        "check": "hasRole",
                        "authority": authority,
                        "user": call.user,
                        "role": role,
                    }),
                    json!(equals),
                    actual,
                )
            }
            Expectation::DoesRoleHaveCapability {
                authority,
                role,
                target,
                function,
                equals,
            } => {
                let authority = self.resolve(authority)?;
                let call = RolesAuthority::doesRoleHaveCapabilityCall {
                    role: *role,
                    target: self.resolve(target)?,
                    functionSig: function.selector(),
                };
                let actual = self.chain.view(authority, &call).map(|r| json!(r._0));
                (
                    json!({
                        "step": "Expect",
                        "check": "doesRoleHaveCapability",
                        "authority": authority,
                        "role": role,
                        "target": call.target,
                        "function": function.to_string(),
                    }),
                    json!(equals),
                    actual,
                )
            }
            Expectation::LogCount { equals } => (
                json!({ "step": "Expect", "check": "logCount" }),
                json!(equals),
                Ok::<Value, Revert>(json!(self.chain.logs().len())),
            ),
        };

        let actual = actual.unwrap_or_else(|revert| json!(format!("reverted: {revert}")));
        Ok(StepReport {
            index,
            description,
            passed: actual == expected,
            outcome: StepOutcome::Checked { expected, actual },
        })
    }
}
