// End to end behaviour of Auth and RolesAuthority driven through
// Chain::call, the same way an external caller would.

use super::chain::Chain;
use crate::bindings::auth::Auth;
use crate::bindings::roles_authority::RolesAuthority;
use crate::types::revert::Revert;
use crate::utils::function_selector::Selector;
use alloy::primitives::{Address, FixedBytes, Log, address};
use alloy::sol_types::{SolCall, SolEvent, SolInterface};
use proptest::prelude::*;

const DEPLOYER: Address = address!("0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d");
const OWNER: Address = address!("0x0000000000000000000000000000000000000420");
const PLAIN_AUTHORITY: Address = address!("0x0000000000000000000000000000000000000421");
const STRANGER: Address = address!("0x0000000000000000000000000000000000000999");
const SCALI: Address = address!("0x0000000000000000000000000000000000050ca1");
const AUTH_AT: Address = address!("0x00000000000000000000000000000000000000aa");

fn set_authority_selector() -> Selector {
    Auth::setAuthorityCall::SELECTOR.into()
}

fn set_owner_selector() -> Selector {
    Auth::setOwnerCall::SELECTOR.into()
}

/// Auth guarded by a RolesAuthority, both owned by OWNER.
fn guarded_auth() -> (Chain, Address, Address) {
    let mut chain = Chain::new();
    let roles = chain.deploy_roles_authority(DEPLOYER, OWNER, Address::ZERO);
    let auth = chain.deploy_auth(DEPLOYER, OWNER, roles);
    chain.drain_logs();
    (chain, auth, roles)
}

fn owner_of(chain: &Chain, at: Address) -> Address {
    chain.view(at, &Auth::ownerCall {}).unwrap()._0
}

fn decode_owner_updated(log: &Log) -> Auth::OwnerUpdated {
    Auth::OwnerUpdated::decode_log_data(&log.data, true).unwrap()
}

#[test]
fn test_initialization_reports_values_and_emits_two_events() {
    let mut chain = Chain::new();
    let auth = chain.deploy_auth(DEPLOYER, OWNER, PLAIN_AUTHORITY);

    assert_eq!(owner_of(&chain, auth), OWNER);
    assert_eq!(
        chain.view(auth, &Auth::authorityCall {}).unwrap()._0,
        PLAIN_AUTHORITY
    );

    let logs = chain.logs();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|log| log.address == auth));

    let owner_updated = decode_owner_updated(&logs[0]);
    assert_eq!(owner_updated.user, DEPLOYER);
    assert_eq!(owner_updated.newOwner, OWNER);

    let authority_updated = Auth::AuthorityUpdated::decode_log_data(&logs[1].data, true).unwrap();
    assert_eq!(authority_updated.user, DEPLOYER);
    assert_eq!(authority_updated.newAuthority, PLAIN_AUTHORITY);
}

#[test]
fn test_owner_scenario_with_plain_authority_address() {
    let mut chain = Chain::new();
    let auth = chain
        .deploy_auth_at(AUTH_AT, DEPLOYER, OWNER, PLAIN_AUTHORITY)
        .unwrap();
    chain.drain_logs();

    assert_eq!(owner_of(&chain, auth), OWNER);

    chain
        .transact(OWNER, auth, &Auth::setOwnerCall { newOwner: OWNER })
        .unwrap();
    let logs = chain.drain_logs();
    assert_eq!(logs.len(), 1);
    let event = decode_owner_updated(&logs[0]);
    assert_eq!((event.user, event.newOwner), (OWNER, OWNER));

    let result = chain.transact(STRANGER, auth, &Auth::setOwnerCall { newOwner: SCALI });
    assert_eq!(
        result,
        Err(Revert::Unauthorized {
            caller: STRANGER,
            target: auth,
            selector: set_owner_selector(),
        })
    );
    assert_eq!(owner_of(&chain, auth), OWNER);
    assert!(chain.logs().is_empty());
}

#[test]
fn test_owner_can_hand_over_ownership() {
    let (mut chain, auth, _) = guarded_auth();
    chain
        .transact(OWNER, auth, &Auth::setOwnerCall { newOwner: SCALI })
        .unwrap();
    assert_eq!(owner_of(&chain, auth), SCALI);

    // The previous owner lost its rights
    let before = chain.clone();
    assert!(
        chain
            .transact(OWNER, auth, &Auth::setOwnerCall { newOwner: OWNER })
            .is_err()
    );
    assert_eq!(chain, before);
}

#[test]
fn test_role_granted_caller_may_set_owner() {
    let (mut chain, auth, roles) = guarded_auth();
    let set_owner = Auth::setOwnerCall { newOwner: SCALI };
    assert!(chain.transact(STRANGER, auth, &set_owner).is_err());

    chain
        .transact(
            OWNER,
            roles,
            &RolesAuthority::setUserRoleCall {
                user: STRANGER,
                role: 0,
                enabled: true,
            },
        )
        .unwrap();
    chain
        .transact(
            OWNER,
            roles,
            &RolesAuthority::setRoleCapabilityCall {
                role: 0,
                target: auth,
                functionSig: set_owner_selector(),
                enabled: true,
            },
        )
        .unwrap();
    chain.drain_logs();

    chain.transact(STRANGER, auth, &set_owner).unwrap();
    assert_eq!(owner_of(&chain, auth), SCALI);

    // The event names the real caller, not the authority
    let logs = chain.drain_logs();
    let event = decode_owner_updated(&logs[0]);
    assert_eq!(event.user, STRANGER);
    assert_eq!(logs[0].address, auth);
}

#[test]
fn test_public_capability_lets_anyone_set_authority() {
    let (mut chain, auth, roles) = guarded_auth();
    chain
        .transact(
            OWNER,
            roles,
            &RolesAuthority::setPublicCapabilityCall {
                target: auth,
                functionSig: set_authority_selector(),
                enabled: true,
            },
        )
        .unwrap();

    for caller in [STRANGER, SCALI, DEPLOYER] {
        chain
            .transact(caller, auth, &Auth::setAuthorityCall { newAuthority: roles })
            .unwrap();
    }
    assert_eq!(chain.view(auth, &Auth::authorityCall {}).unwrap()._0, roles);

    let logs = chain.drain_logs();
    let last = Auth::AuthorityUpdated::decode_log_data(&logs[logs.len() - 1].data, true).unwrap();
    assert_eq!(last.user, DEPLOYER);

    // Only setAuthority was made public
    assert!(
        chain
            .transact(STRANGER, auth, &Auth::setOwnerCall { newOwner: STRANGER })
            .is_err()
    );
}

#[test]
fn test_revoked_capability_denies_again() {
    let (mut chain, auth, roles) = guarded_auth();
    let grant = |chain: &mut Chain, enabled: bool| {
        chain
            .transact(
                OWNER,
                roles,
                &RolesAuthority::setUserRoleCall {
                    user: STRANGER,
                    role: 42,
                    enabled: true,
                },
            )
            .unwrap();
        chain
            .transact(
                OWNER,
                roles,
                &RolesAuthority::setRoleCapabilityCall {
                    role: 42,
                    target: auth,
                    functionSig: set_authority_selector(),
                    enabled,
                },
            )
            .unwrap();
        chain
            .transact(
                OWNER,
                roles,
                &RolesAuthority::setPublicCapabilityCall {
                    target: auth,
                    functionSig: set_authority_selector(),
                    enabled,
                },
            )
            .unwrap();
    };
    let can_call = |chain: &Chain| {
        chain
            .view(
                roles,
                &RolesAuthority::canCallCall {
                    user: STRANGER,
                    target: auth,
                    functionSig: set_authority_selector(),
                },
            )
            .unwrap()
            ._0
    };

    grant(&mut chain, true);
    assert!(can_call(&chain));

    grant(&mut chain, false);
    assert!(!can_call(&chain));
    // The user still holds the role, only the capability is gone
    assert!(
        chain
            .view(
                roles,
                &RolesAuthority::hasRoleCall {
                    user: STRANGER,
                    role: 42
                }
            )
            .unwrap()
            ._0
    );
    assert!(matches!(
        chain.transact(STRANGER, auth, &Auth::setAuthorityCall { newAuthority: SCALI }),
        Err(Revert::Unauthorized { .. })
    ));
}

#[test]
fn test_roles_authority_is_guarded_by_its_own_authority() {
    let mut chain = Chain::new();
    let root = chain.deploy_roles_authority(DEPLOYER, OWNER, Address::ZERO);
    let roles = chain.deploy_roles_authority(DEPLOYER, OWNER, root);
    let auth = chain.deploy_auth(DEPLOYER, OWNER, roles);

    let set_user_role = RolesAuthority::setUserRoleCall {
        user: STRANGER,
        role: 1,
        enabled: true,
    };
    assert!(chain.transact(SCALI, roles, &set_user_role).is_err());

    // root delegates management of `roles` to SCALI
    chain
        .transact(
            OWNER,
            root,
            &RolesAuthority::setUserRoleCall {
                user: SCALI,
                role: 9,
                enabled: true,
            },
        )
        .unwrap();
    for selector in [
        RolesAuthority::setUserRoleCall::SELECTOR,
        RolesAuthority::setRoleCapabilityCall::SELECTOR,
    ] {
        chain
            .transact(
                OWNER,
                root,
                &RolesAuthority::setRoleCapabilityCall {
                    role: 9,
                    target: roles,
                    functionSig: selector.into(),
                    enabled: true,
                },
            )
            .unwrap();
    }

    chain.transact(SCALI, roles, &set_user_role).unwrap();
    chain
        .transact(
            SCALI,
            roles,
            &RolesAuthority::setRoleCapabilityCall {
                role: 1,
                target: auth,
                functionSig: set_owner_selector(),
                enabled: true,
            },
        )
        .unwrap();

    // SCALI configured `roles`, which now lets STRANGER take over `auth`
    chain
        .transact(STRANGER, auth, &Auth::setOwnerCall { newOwner: STRANGER })
        .unwrap();
    assert_eq!(owner_of(&chain, auth), STRANGER);

    // but SCALI was never granted anything on `auth` itself
    assert!(
        chain
            .transact(SCALI, auth, &Auth::setOwnerCall { newOwner: SCALI })
            .is_err()
    );
}

#[test]
fn test_reads_are_total_on_boundary_inputs() {
    let (chain, auth, roles) = guarded_auth();
    let zero_selector = FixedBytes::<4>::ZERO;

    assert!(
        !chain
            .view(
                roles,
                &RolesAuthority::hasRoleCall {
                    user: Address::ZERO,
                    role: 255
                }
            )
            .unwrap()
            ._0
    );
    assert!(
        !chain
            .view(
                roles,
                &RolesAuthority::doesRoleHaveCapabilityCall {
                    role: 255,
                    target: Address::ZERO,
                    functionSig: zero_selector,
                }
            )
            .unwrap()
            ._0
    );
    assert!(
        !chain
            .view(
                roles,
                &RolesAuthority::canCallCall {
                    user: Address::ZERO,
                    target: Address::ZERO,
                    functionSig: zero_selector,
                }
            )
            .unwrap()
            ._0
    );
    assert_eq!(
        chain
            .view(
                roles,
                &RolesAuthority::getRolesWithCapabilityCall {
                    target: auth,
                    functionSig: zero_selector,
                }
            )
            .unwrap()
            ._0,
        FixedBytes::<32>::ZERO
    );
}

#[test]
fn test_role_bits_are_independent() {
    let (mut chain, auth, roles) = guarded_auth();
    chain
        .transact(
            OWNER,
            roles,
            &RolesAuthority::setUserRoleCall {
                user: STRANGER,
                role: 5,
                enabled: true,
            },
        )
        .unwrap();

    for role in 0..=u8::MAX {
        let has_role = chain
            .view(
                roles,
                &RolesAuthority::hasRoleCall {
                    user: STRANGER,
                    role,
                },
            )
            .unwrap()
            ._0;
        assert_eq!(has_role, role == 5, "role {role}");

        let has_capability = chain
            .view(
                roles,
                &RolesAuthority::doesRoleHaveCapabilityCall {
                    role,
                    target: auth,
                    functionSig: set_owner_selector(),
                },
            )
            .unwrap()
            ._0;
        assert!(!has_capability, "role {role}");
    }
}

#[test]
fn test_mutators_are_idempotent() {
    let (mut chain, auth, roles) = guarded_auth();
    let calls: Vec<RolesAuthority::RolesAuthorityCalls> = vec![
        RolesAuthority::RolesAuthorityCalls::setRoleCapability(
            RolesAuthority::setRoleCapabilityCall {
                role: 3,
                target: auth,
                functionSig: set_owner_selector(),
                enabled: true,
            },
        ),
        RolesAuthority::RolesAuthorityCalls::setUserRole(RolesAuthority::setUserRoleCall {
            user: STRANGER,
            role: 3,
            enabled: true,
        }),
        RolesAuthority::RolesAuthorityCalls::setPublicCapability(
            RolesAuthority::setPublicCapabilityCall {
                target: auth,
                functionSig: set_authority_selector(),
                enabled: true,
            },
        ),
    ];

    for call in calls {
        let calldata = call.abi_encode();
        chain.call(OWNER, roles, &calldata).unwrap();
        let once = chain.contract(roles).cloned();
        chain.call(OWNER, roles, &calldata).unwrap();
        assert_eq!(chain.contract(roles).cloned(), once);
    }
}

#[test]
fn test_unrecognized_selectors_are_rejected() {
    let (mut chain, auth, roles) = guarded_auth();
    let before = chain.clone();

    let mut probes: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x8d, 0xa5, 0xcb],
        vec![0xde, 0xad, 0xbe, 0xef],
        // transferOwnership(address) is not part of either surface
        crate::utils::function_selector::selector_from_signature("transferOwnership(address)")
            .to_vec(),
    ];
    // RolesAuthority-only selectors are unknown to a plain Auth
    probes.push(
        RolesAuthority::setUserRoleCall {
            user: OWNER,
            role: 0,
            enabled: true,
        }
        .abi_encode(),
    );

    for calldata in &probes {
        // Even the owner gets no fallback
        let result = chain.call(OWNER, auth, calldata);
        assert!(
            matches!(result, Err(Revert::UnrecognizedOperation { .. })),
            "{calldata:?} -> {result:?}"
        );
    }
    for calldata in &probes[..4] {
        assert!(matches!(
            chain.call(OWNER, roles, calldata),
            Err(Revert::UnrecognizedOperation { .. })
        ));
    }
    assert_eq!(chain, before);
}

#[test]
fn test_reads_ignore_trailing_calldata() {
    let (mut chain, auth, roles) = guarded_auth();
    chain
        .transact(
            OWNER,
            roles,
            &RolesAuthority::setUserRoleCall {
                user: STRANGER,
                role: 2,
                enabled: true,
            },
        )
        .unwrap();

    let mut has_role = RolesAuthority::hasRoleCall {
        user: STRANGER,
        role: 2,
    }
    .abi_encode();
    has_role.extend_from_slice(&[0u8; 32]);
    let output = chain.call(SCALI, roles, &has_role).unwrap();
    assert!(
        RolesAuthority::hasRoleCall::abi_decode_returns(&output, true)
            .unwrap()
            ._0
    );

    let mut can_call = RolesAuthority::canCallCall {
        user: STRANGER,
        target: auth,
        functionSig: set_owner_selector(),
    }
    .abi_encode();
    // An appended sender address, as forwarded meta transactions do
    can_call.extend_from_slice(&[0u8; 32]);
    can_call.extend_from_slice(SCALI.as_slice());
    let output = chain.static_call(roles, &can_call).unwrap();
    assert!(
        !RolesAuthority::canCallCall::abi_decode_returns(&output, true)
            .unwrap()
            ._0
    );
}

#[test]
fn test_roles_authority_owner_and_authority_are_gated() {
    let (mut chain, auth, roles) = guarded_auth();

    chain
        .transact(OWNER, roles, &RolesAuthority::setOwnerCall { newOwner: SCALI })
        .unwrap();
    let logs = chain.drain_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].address, roles);
    let event = decode_owner_updated(&logs[0]);
    assert_eq!((event.user, event.newOwner), (OWNER, SCALI));
    assert_eq!(owner_of(&chain, roles), SCALI);

    // The previous owner keeps nothing on the authority it used to own
    let before = chain.clone();
    let denied: Vec<RolesAuthority::RolesAuthorityCalls> = vec![
        RolesAuthority::RolesAuthorityCalls::setUserRole(RolesAuthority::setUserRoleCall {
            user: OWNER,
            role: 0,
            enabled: true,
        }),
        RolesAuthority::RolesAuthorityCalls::setRoleCapability(
            RolesAuthority::setRoleCapabilityCall {
                role: 0,
                target: auth,
                functionSig: set_owner_selector(),
                enabled: true,
            },
        ),
        RolesAuthority::RolesAuthorityCalls::setPublicCapability(
            RolesAuthority::setPublicCapabilityCall {
                target: auth,
                functionSig: set_owner_selector(),
                enabled: true,
            },
        ),
        RolesAuthority::RolesAuthorityCalls::setAuthority(RolesAuthority::setAuthorityCall {
            newAuthority: OWNER,
        }),
    ];
    for call in &denied {
        let result = chain.call(OWNER, roles, &call.abi_encode());
        assert_eq!(
            result,
            Err(Revert::Unauthorized {
                caller: OWNER,
                target: roles,
                selector: call.selector().into(),
            })
        );
    }
    assert_eq!(chain, before);

    // Hand governance of `roles` to a second authority run by OWNER
    let governor = chain.deploy_roles_authority(DEPLOYER, OWNER, Address::ZERO);
    chain
        .transact(
            SCALI,
            roles,
            &RolesAuthority::setAuthorityCall {
                newAuthority: governor,
            },
        )
        .unwrap();
    assert_eq!(
        chain.view(roles, &RolesAuthority::authorityCall {}).unwrap()._0,
        governor
    );
    let logs = chain.drain_logs();
    let event = Auth::AuthorityUpdated::decode_log_data(&logs[logs.len() - 1].data, true).unwrap();
    assert_eq!(logs[logs.len() - 1].address, roles);
    assert_eq!((event.user, event.newAuthority), (SCALI, governor));

    let grant = RolesAuthority::setPublicCapabilityCall {
        target: auth,
        functionSig: set_authority_selector(),
        enabled: true,
    };
    assert!(chain.transact(STRANGER, roles, &grant).is_err());

    chain
        .transact(
            OWNER,
            governor,
            &RolesAuthority::setPublicCapabilityCall {
                target: roles,
                functionSig: RolesAuthority::setPublicCapabilityCall::SELECTOR.into(),
                enabled: true,
            },
        )
        .unwrap();
    chain.transact(STRANGER, roles, &grant).unwrap();
    assert!(
        chain
            .view(
                roles,
                &RolesAuthority::isCapabilityPublicCall {
                    target: auth,
                    functionSig: set_authority_selector(),
                }
            )
            .unwrap()
            ._0
    );
}

proptest! {
    #[test]
    fn prop_unknown_selector_never_succeeds(
        selector in any::<[u8; 4]>(),
        tail in proptest::collection::vec(any::<u8>(), 0..96),
        caller in any::<[u8; 20]>(),
    ) {
        prop_assume!(!RolesAuthority::RolesAuthorityCalls::valid_selector(selector));
        let (mut chain, auth, roles) = guarded_auth();
        let before = chain.clone();
        let calldata = [selector.as_slice(), tail.as_slice()].concat();

        for target in [auth, roles] {
            let result = chain.call(Address::from(caller), target, &calldata);
            prop_assert_eq!(
                result,
                Err(Revert::UnrecognizedOperation { selector: selector.into() })
            );
        }
        prop_assert_eq!(chain, before);
    }

    #[test]
    fn prop_only_owner_sets_owner_without_grants(caller in any::<[u8; 20]>()) {
        let caller = Address::from(caller);
        prop_assume!(caller != OWNER);
        let (mut chain, auth, _) = guarded_auth();
        let before = chain.clone();

        let result = chain.transact(caller, auth, &Auth::setOwnerCall { newOwner: caller });
        let is_unauthorized = matches!(result, Err(Revert::Unauthorized { .. }));
        prop_assert!(is_unauthorized);
        prop_assert_eq!(chain, before);
    }

    #[test]
    fn prop_single_role_grant_sets_single_bit(role in any::<u8>(), probe in any::<u8>()) {
        let (mut chain, _, roles) = guarded_auth();
        chain
            .transact(
                OWNER,
                roles,
                &RolesAuthority::setUserRoleCall { user: STRANGER, role, enabled: true },
            )
            .unwrap();

        let has_role = chain
            .view(roles, &RolesAuthority::hasRoleCall { user: STRANGER, role: probe })
            .unwrap()
            ._0;
        prop_assert_eq!(has_role, role == probe);
    }
}
