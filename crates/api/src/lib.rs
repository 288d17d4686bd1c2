//! HTTP API layer for reelvote.
//!
//! This crate provides the JSON endpoints:
//!
//! - **Endpoints**: vote registration, bulk movie lookup, user registration
//!   and profile retrieval
//! - **State**: the service handles shared by every handler
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
