pub mod auth;
pub mod roles_authority;

use alloy::primitives::FixedBytes;
use alloy::sol_types::SolCall;
use serde_json::{Value, json};

use self::auth::Auth;
use self::roles_authority::RolesAuthority;

fn entry<C: SolCall>() -> Value {
    json!({
        "signature": C::SIGNATURE,
        "selector": FixedBytes::from(C::SELECTOR).to_string(),
    })
}

/// Every recognized selector of both surfaces, keyed by contract.
pub fn selector_table() -> Value {
    json!({
        "Auth": [
            entry::<Auth::ownerCall>(),
            entry::<Auth::setOwnerCall>(),
            entry::<Auth::authorityCall>(),
            entry::<Auth::setAuthorityCall>(),
        ],
        "RolesAuthority": [
            entry::<RolesAuthority::ownerCall>(),
            entry::<RolesAuthority::setOwnerCall>(),
            entry::<RolesAuthority::authorityCall>(),
            entry::<RolesAuthority::setAuthorityCall>(),
            entry::<RolesAuthority::hasRoleCall>(),
            entry::<RolesAuthority::doesRoleHaveCapabilityCall>(),
            entry::<RolesAuthority::canCallCall>(),
            entry::<RolesAuthority::getUserRolesCall>(),
            entry::<RolesAuthority::getRolesWithCapabilityCall>(),
            entry::<RolesAuthority::isCapabilityPublicCall>(),
            entry::<RolesAuthority::setPublicCapabilityCall>(),
            entry::<RolesAuthority::setRoleCapabilityCall>(),
            entry::<RolesAuthority::setUserRoleCall>(),
        ],
    })
}
