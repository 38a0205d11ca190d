// Common test utilities

pub mod harness;
pub mod logs;

pub use harness::*;
pub use logs::*;
