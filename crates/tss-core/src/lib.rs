//! Ambient building blocks shared by every Traffic Safety System service:
//! error envelope, JSON body extractor, health handlers, tracing setup and
//! request-id middleware.

pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
