pub mod authority_code;
pub mod health;
pub mod user;
