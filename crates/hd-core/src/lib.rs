//! Core domain + application logic for the helpdesk chatbot.
//!
//! This crate is intentionally framework-agnostic. The HTTP transport, the
//! OpenAI completion API and SMTP delivery live behind ports (traits)
//! implemented in adapter crates.

pub mod chat;
pub mod config;
pub mod domain;
pub mod errors;
pub mod faq;
pub mod logging;
pub mod model;
pub mod notify;
pub mod resolver;

pub use errors::{Error, Result};
