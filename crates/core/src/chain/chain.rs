// In-memory execution environment for Auth and RolesAuthority contracts.
// Contracts live at addresses and reach each other by address, calls are
// all-or-nothing and every emitted event lands in one ordered log.

use crate::contracts::auth::Auth;
use crate::contracts::gate::{AuthState, Authority, requires_auth};
use crate::contracts::roles_authority::RolesAuthority;
use crate::contracts::{Contract, Operation};
use crate::types::revert::Revert;
use crate::utils::function_selector::selector_of;
use alloy::primitives::{Address, Bytes, Log, LogData};
use alloy::sol_types::SolCall;
use log::{debug, info};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    contracts: HashMap<Address, Contract>,
    nonces: HashMap<Address, u64>,
    logs: Vec<Log>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deploy_auth(&mut self, deployer: Address, owner: Address, authority: Address) -> Address {
        let at = self.next_address(deployer);
        self.install(at, deployer, owner, authority, |state| {
            Contract::Auth(Auth::new(state))
        })
    }

    pub fn deploy_auth_at(
        &mut self,
        at: Address,
        deployer: Address,
        owner: Address,
        authority: Address,
    ) -> Result<Address, Revert> {
        self.ensure_vacant(at)?;
        Ok(self.install(at, deployer, owner, authority, |state| {
            Contract::Auth(Auth::new(state))
        }))
    }

    pub fn deploy_roles_authority(
        &mut self,
        deployer: Address,
        owner: Address,
        authority: Address,
    ) -> Address {
        let at = self.next_address(deployer);
        self.install(at, deployer, owner, authority, |state| {
            Contract::RolesAuthority(RolesAuthority::new(state))
        })
    }

    pub fn deploy_roles_authority_at(
        &mut self,
        at: Address,
        deployer: Address,
        owner: Address,
        authority: Address,
    ) -> Result<Address, Revert> {
        self.ensure_vacant(at)?;
        Ok(self.install(at, deployer, owner, authority, |state| {
            Contract::RolesAuthority(RolesAuthority::new(state))
        }))
    }

    pub fn contract(&self, at: Address) -> Option<&Contract> {
        self.contracts.get(&at)
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    pub fn drain_logs(&mut self) -> Vec<Log> {
        std::mem::take(&mut self.logs)
    }

    /// Executes `calldata` against `target` on behalf of `caller`.
    ///
    /// The call is decoded against the target's surface, privileged
    /// operations pass the target's gate, and only then is state touched.
    /// Any error leaves storage and the log exactly as they were.
    pub fn call(&mut self, caller: Address, target: Address, calldata: &[u8]) -> Result<Bytes, Revert> {
        let contract = self.contracts.get(&target).ok_or(Revert::NoContract(target))?;
        let operation = contract.decode(calldata)?;

        if operation.is_privileged() {
            let state = contract.state();
            requires_auth(
                state,
                self.authority_at(state.authority()),
                caller,
                target,
                operation.selector(),
            )?;
        }

        let contract = self
            .contracts
            .get_mut(&target)
            .ok_or(Revert::NoContract(target))?;
        let execution = contract.apply(caller, operation)?;

        debug!(
            "chain: {} called {} on {} ({} event(s))",
            caller,
            selector_of(calldata),
            target,
            execution.logs.len()
        );
        self.record(target, execution.logs);
        Ok(execution.output)
    }

    /// Read-only variant of [`Chain::call`]; privileged selectors are
    /// rejected with [`Revert::StaticCallViolation`].
    pub fn static_call(&self, target: Address, calldata: &[u8]) -> Result<Bytes, Revert> {
        let contract = self.contracts.get(&target).ok_or(Revert::NoContract(target))?;
        let operation = contract.decode(calldata)?;
        contract.view(&operation).map(Bytes::from)
    }

    /// Typed [`Chain::call`] over a generated call struct.
    pub fn transact<C: SolCall>(
        &mut self,
        caller: Address,
        target: Address,
        call: &C,
    ) -> Result<C::Return, Revert> {
        let output = self.call(caller, target, &call.abi_encode())?;
        Self::decode_returns::<C>(&output)
    }

    /// Typed [`Chain::static_call`] over a generated call struct.
    pub fn view<C: SolCall>(&self, target: Address, call: &C) -> Result<C::Return, Revert> {
        let output = self.static_call(target, &call.abi_encode())?;
        Self::decode_returns::<C>(&output)
    }

    fn decode_returns<C: SolCall>(output: &[u8]) -> Result<C::Return, Revert> {
        C::abi_decode_returns(output, true).map_err(|_| Revert::MalformedReturnData {
            selector: C::SELECTOR.into(),
        })
    }

    /// Resolves an authority address to something that answers `canCall`.
    /// Zero, empty addresses and contracts without that surface resolve to
    /// `None`, which the gate treats as a denial.
    fn authority_at(&self, at: Address) -> Option<&dyn Authority> {
        if at.is_zero() {
            return None;
        }
        let authority = self.contracts.get(&at).and_then(Contract::as_authority);
        if authority.is_none() {
            debug!("chain: authority {} does not implement canCall", at);
        }
        authority
    }

    fn install(
        &mut self,
        at: Address,
        deployer: Address,
        owner: Address,
        authority: Address,
        build: impl FnOnce(AuthState) -> Contract,
    ) -> Address {
        let (state, logs) = AuthState::new(deployer, owner, authority);
        let contract = build(state);
        info!(
            "chain: deployed {} at {} (owner {}, authority {})",
            contract.kind(),
            at,
            owner,
            authority
        );
        self.contracts.insert(at, contract);
        self.record(at, logs);
        at
    }

    fn ensure_vacant(&self, at: Address) -> Result<(), Revert> {
        if self.contracts.contains_key(&at) {
            Err(Revert::AlreadyDeployed(at))
        } else {
            Ok(())
        }
    }

    fn next_address(&mut self, deployer: Address) -> Address {
        loop {
            let nonce = self.nonces.entry(deployer).or_insert(0);
            let at = deployer.create(*nonce);
            *nonce += 1;
            if !self.contracts.contains_key(&at) {
                return at;
            }
        }
    }

    fn record(&mut self, address: Address, logs: Vec<LogData>) {
        self.logs
            .extend(logs.into_iter().map(|data| Log { address, data }));
    }
}
