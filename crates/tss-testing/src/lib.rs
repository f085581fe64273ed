//! Test utilities for Traffic Safety System services.
//!
//! Import from `[dev-dependencies]` only; never in production code.

pub mod auth;
pub mod http;
