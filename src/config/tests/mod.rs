//! Config module tests
//!
//! Contains test suites for configuration:
//! - Environment lookup and defaults
//! - Bindings file loading (permissive and strict)
//! - Installing loaded bindings on a matcher
