//! Completion-provider port and its provider-agnostic types.

pub mod client;
pub mod types;
