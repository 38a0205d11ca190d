// Kernel - provider clients behind traits
//
// Concrete Twilio/Firebase clients are wrapped in adapters so handlers only
// ever see the Base* traits; tests swap in the mocks from test_dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::*;
pub use traits::*;
