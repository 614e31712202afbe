pub mod config_wrapper;
pub mod revert;
pub mod role_set;
