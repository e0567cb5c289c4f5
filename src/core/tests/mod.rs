//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Descriptor and bindings file parsing
//! - Binding table operations
//! - Sequence matching, timeouts and resets
//! - Conflict detection
//! - Type tests (Keystroke, Modifiers, Binding)

#[cfg(test)]
mod matcher_tests;
