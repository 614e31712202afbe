pub mod address_or_label;
pub mod function_selector;
pub mod remote;
