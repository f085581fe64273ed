//! Auth types shared across Traffic Safety System services.
//!
//! Provides the `IdentityHeaders` extractor for gateway-injected identity.

pub mod identity;
