// Marsos Auth API - Core
//
// Phone-number sign-in backend: sends OTPs through Twilio Verify, checks them,
// and trades an approved check for a Firebase custom token.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
