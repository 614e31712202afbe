use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use eyre::Result;
use log::info;
use serde::Serialize;

use crate::bindings::{auth::Auth, roles_authority::RolesAuthority};
use crate::utils::function_selector::Selector;

#[derive(Serialize, Debug)]
pub struct AuthSnapshot {
    pub target: Address,
    pub owner: Address,
    pub authority: Address,
}

#[derive(Serialize, Debug)]
pub struct PermissionSnapshot {
    pub authority: Address,
    pub user: Address,
    pub target: Address,
    pub function_selector: String,
    pub can_call: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_role: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_has_capability: Option<bool>,
}

/// Reads owner and authority of a deployed Auth contract.
pub async fn inspect_auth(rpc_url: &str, target: Address) -> Result<AuthSnapshot> {
    let provider = ProviderBuilder::new().on_builtin(rpc_url).await?;
    let auth = Auth::new(target, provider);

    info!("remote: reading owner and authority of {}", target);
    let (owner, authority) = tokio::try_join!(
        async { auth.owner().call().await },
        async { auth.authority().call().await },
    )?;

    Ok(AuthSnapshot {
        target,
        owner: owner._0,
        authority: authority._0,
    })
}

/// Asks a deployed RolesAuthority whether `user` may call `selector` on
/// `target`, and optionally how `role` relates to that capability.
pub async fn inspect_permission(
    rpc_url: &str,
    authority: Address,
    user: Address,
    target: Address,
    selector: Selector,
    role: Option<u8>,
) -> Result<PermissionSnapshot> {
    let provider = ProviderBuilder::new().on_builtin(rpc_url).await?;
    let roles_authority = RolesAuthority::new(authority, provider);

    info!(
        "remote: canCall({}, {}, {}) on {}",
        user, target, selector, authority
    );
    let can_call = roles_authority
        .canCall(user, target, selector)
        .call()
        .await?
        ._0;

    let (has_role, role_has_capability) = match role {
        Some(role) => {
            let (has_role, has_capability) = tokio::try_join!(
                async { roles_authority.hasRole(user, role).call().await },
                async {
                    roles_authority
                        .doesRoleHaveCapability(role, target, selector)
                        .call()
                        .await
                },
            )?;
            (Some(has_role._0), Some(has_capability._0))
        }
        None => (None, None),
    };

    Ok(PermissionSnapshot {
        authority,
        user,
        target,
        function_selector: selector.to_string(),
        can_call,
        role,
        has_role,
        role_has_capability,
    })
}
