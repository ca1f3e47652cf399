//! Relay module
//!
//! Turns one inbound chat request into one upstream call and maps the
//! outcome back to an HTTP response.

pub mod cors;
pub mod handler;
pub mod request;

pub use handler::RelayHandler;
pub use request::{ChatMessage, IncomingRequest, OutboundPayload};
