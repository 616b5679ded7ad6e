pub mod builders;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use builders::{comment, game, review};
#[allow(unused_imports)]
pub use mocks::MockBackend;
#[allow(unused_imports)]
pub use setup::{eventually, session, TestSetup, TestSetupBuilder};
