//! Best-effort exchange reports over an outbound mail relay.

pub mod dispatch;
pub mod notifier;
pub mod port;
