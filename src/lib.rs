// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! keyseq
//!
//! Matches live key presses against registered keys and key sequences and
//! runs the bound handler when a sequence completes.
//!
//! # Features
//!
//! - **Chords and sequences:** `"s"`, `"ctrl+s"`, `"t e s t"`, `"ctrl+x ctrl+s"`
//! - **Timeout reset:** a partial sequence is dropped after 500ms of silence
//!   (configurable)
//! - **Backend agnostic:** adapters feed `(Key, Modifiers)` pairs through the
//!   [`Keyboard`] trait
//! - **Deterministic time:** the clock is injected, so timeouts are testable
//! - **Conflict detection:** duplicate, shadowed and typo'd bindings
//!
//! # Architecture
//!
//! - **`core`:** Keys, descriptors, binding table, sequence matcher
//! - **`config`:** Engine settings and bindings file loading
//!
//! # Examples
//!
//! ## Binding and feeding keys
//!
//! ```
//! use keyseq::{Key, Modifiers, SequenceMatcher};
//!
//! let mut matcher = SequenceMatcher::new();
//! matcher.bind(&["t e s t"], || println!("pressed 't e s t'"));
//!
//! for key in [Key::T, Key::E, Key::S, Key::T] {
//!     matcher.record_key(key, Modifiers::empty());
//! }
//! ```
//!
//! ## Listing bindings
//!
//! ```
//! use keyseq::SequenceMatcher;
//!
//! let mut matcher = SequenceMatcher::new();
//! matcher.bind(&["ctrl+s", "command+s"], || {});
//!
//! for binding in matcher.bindings() {
//!     println!(" - {:?}", binding.identifier());
//! }
//! ```

pub mod config;
pub mod core;

// Re-export commonly used types for convenience
pub use core::{
    Binding, Clock, Handler, Key, Keyboard, Keystroke, ManualClock, Modifiers, Outcome,
    SequenceMatcher, SystemClock,
};
