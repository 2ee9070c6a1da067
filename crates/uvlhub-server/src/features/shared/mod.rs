//! Shared utilities for feature modules
//!
//! - **test_helpers**: Test fixtures (test-only)

#[cfg(test)]
pub mod test_helpers;
