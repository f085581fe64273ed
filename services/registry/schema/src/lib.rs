//! sea-orm entities owned by the registry service.

pub mod authority_codes;
pub mod users;
