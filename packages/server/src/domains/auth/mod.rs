//! Phone-number authentication: OTP dispatch, OTP check, custom token issue.

pub mod actions;
pub mod errors;
pub mod types;

pub use errors::AuthError;
pub use types::*;
