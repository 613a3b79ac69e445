//! Route handlers.

mod chat;
mod health;

pub use chat::handle_chat;
pub use health::handle_health;
