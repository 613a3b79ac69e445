//! HTTP adapter (axum).
//!
//! Exposes the `hd-core` chat service as `POST /chat/` with permissive or
//! allow-listed CORS, and maps core errors onto HTTP responses.

use std::sync::Arc;

use hd_core::chat::ChatService;

pub mod error;
pub mod handlers;
pub mod router;

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(chat: Arc<ChatService>) -> Self {
        Self { chat }
    }
}
