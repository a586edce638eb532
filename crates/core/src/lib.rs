pub mod common;
pub mod config;
pub mod market;
pub mod scan;
pub mod signal;

#[cfg(feature = "test-utils")]
pub mod testing;
