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

//! src/core/mod.rs
//!
//! Core matching logic
//!
//! This module contains the fundamental data structures and algorithms
//! for key-sequence matching, including:
//! - The closed key set and the encoded keystroke type
//! - Descriptor parsing ("ctrl+s", "t e s t")
//! - The binding table and the sequence matcher
//! - Conflict detection over a set of bindings
//!
//! Nothing here performs I/O. Input capture belongs to adapters, which feed
//! the matcher through the [`Keyboard`] trait.

pub mod clock;
pub mod conflict;
pub mod key;
pub mod keyboard;
pub mod matcher;
pub mod parser;
pub mod table;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use conflict::{Conflict, ConflictDetector, ConflictKind};
pub use key::Key;
pub use keyboard::Keyboard;
pub use matcher::{Outcome, SequenceMatcher, DEFAULT_TIMEOUT};
pub use parser::ParseError;
pub use table::BindingTable;
pub use types::*;

#[cfg(test)]
mod tests;
