pub mod action_spec;
pub mod admin_action;
pub mod raw_call_action;
pub mod set_authority_action;
pub mod set_owner_action;
pub mod set_public_capability_action;
pub mod set_role_capability_action;
pub mod set_user_role_action;
