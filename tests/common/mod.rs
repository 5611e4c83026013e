//! Common test utilities and shared setup

pub mod builders;
pub mod helpers;

use std::env;
use std::sync::Once;

#[allow(unused_imports)]
pub use builders::*;
#[allow(unused_imports)]
pub use helpers::*;

// Global INIT for all tests - ensures logger is initialized only once across all tests
static INIT: Once = Once::new();

/// Shared test setup function that can be used across all test files
/// This should be called at the beginning of each test to ensure proper logging setup
pub fn setup(log_level: &str) {
    INIT.call_once(|| {
        env::set_var("RUST_LOG", log_level);
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
