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

//! Key-sequence recording and matching
//!
//! [`SequenceMatcher`] owns a [`BindingTable`] and a rolling record of the
//! keys pressed so far. Every keystroke runs the same five steps:
//!
//! 1. If more than `timeout` has passed since the previous key, drop the
//!    record.
//! 2. Append the keystroke and remember when it arrived.
//! 3. If the record equals a binding's sequence, clear the record and run
//!    that binding's handler.
//! 4. Otherwise, if the record is a prefix of a longer binding, keep it.
//! 5. Otherwise clear it.
//!
//! # State Machine
//!
//! ```text
//!            key (prefix of a longer binding)
//!           ┌──────────────┐
//!           │              ▼
//! ┌──────┐  key  ┌───────────┐  full match / no match / timeout  ┌──────┐
//! │ Idle │──────▶│ Recording │──────────────────────────────────▶│ Idle │
//! └──────┘       └───────────┘                                   └──────┘
//! ```
//!
//! A full match always wins at the current record length: with `"s"` and
//! `"t e s t"` both bound, typing `t e s t` fires only `"t e s t"` because
//! the record is `t e s` (not `s`) when the `s` arrives.
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use keyseq::{Key, Modifiers, Outcome, SequenceMatcher};
//!
//! let saves = Arc::new(AtomicUsize::new(0));
//! let counter = saves.clone();
//!
//! let mut matcher = SequenceMatcher::new();
//! matcher.bind(&["ctrl+s", "command+s"], move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! let outcome = matcher.record_key(Key::S, Modifiers::CTRL);
//! assert_eq!(outcome, Outcome::Matched { index: 0 });
//! assert_eq!(saves.load(Ordering::SeqCst), 1);
//! ```

use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::core::clock::{Clock, SystemClock};
use crate::core::key::Key;
use crate::core::parser::ParseError;
use crate::core::table::BindingTable;
use crate::core::types::{handler, Binding, Keystroke, Modifiers};

/// Default gap allowed between keys of one sequence.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// What a keystroke did to the matcher.
///
/// Informational only; ignoring it is fine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// A binding completed and its handler ran. `index` is its position in
    /// the table at the time it fired.
    Matched { index: usize },

    /// The record is a prefix of at least one longer binding.
    Pending,

    /// Nothing can match any more; the record was cleared.
    Reset,
}

/// Stateful key-sequence matcher.
///
/// Single-threaded: each [`record_key`](SequenceMatcher::record_key) call runs
/// to completion, including the handler. Callers feeding it from several
/// sources serialise access themselves.
pub struct SequenceMatcher<C: Clock = SystemClock> {
    table: BindingTable,
    record: Vec<Keystroke>,
    stamp: Option<Instant>,
    timeout: Duration,
    clock: C,
}

impl SequenceMatcher<SystemClock> {
    /// Creates a matcher on the system clock with the default timeout.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SequenceMatcher<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SequenceMatcher<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            table: BindingTable::new(),
            record: Vec::new(),
            stamp: None,
            timeout: DEFAULT_TIMEOUT,
            clock,
        }
    }

    /// Binds each descriptor to `f`, parsing permissively.
    pub fn bind<F>(&mut self, descriptors: &[&str], f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.table.bind(descriptors, handler(f));
    }

    /// Binds each descriptor to `f`, or none of them if any fails to parse.
    pub fn try_bind<F>(&mut self, descriptors: &[&str], f: F) -> Result<(), ParseError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.table.try_bind(descriptors, handler(f))
    }

    pub fn unbind(&mut self, identifier: &str) {
        self.table.unbind(identifier);
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn bindings(&self) -> &[Binding] {
        self.table.bindings()
    }

    /// Invokes a binding's handler by identifier, independent of the record.
    pub fn call(&self, identifier: &str) -> bool {
        self.table.call(identifier)
    }

    pub fn table(&self) -> &BindingTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut BindingTable {
        &mut self.table
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the maximum gap between keys of a sequence.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Keys recorded so far in the current sequence.
    pub fn recorded(&self) -> &[Keystroke] {
        &self.record
    }

    /// Drops any partially typed sequence.
    pub fn reset(&mut self) {
        self.record.clear();
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Records a key press at the clock's current time.
    pub fn record_key(&mut self, key: Key, modifiers: Modifiers) -> Outcome {
        let now = self.clock.now();
        self.record_key_at(key, modifiers, now)
    }

    /// Records a key press at an explicit time.
    pub fn record_key_at(&mut self, key: Key, modifiers: Modifiers, now: Instant) -> Outcome {
        self.record_keystroke_at(Keystroke::new(key, modifiers), now)
    }

    /// Records an already encoded keystroke at an explicit time.
    pub fn record_keystroke_at(&mut self, keystroke: Keystroke, now: Instant) -> Outcome {
        if let Some(stamp) = self.stamp {
            // A clock running backwards counts as no time passing
            if now.saturating_duration_since(stamp) > self.timeout && !self.record.is_empty() {
                debug!(dropped = self.record.len(), "sequence timed out");
                self.record.clear();
            }
        }

        self.stamp = Some(now);
        self.record.push(keystroke);
        trace!(%keystroke, len = self.record.len(), "recorded");

        if let Some((index, binding)) = self.table.full_match(&self.record) {
            // Cleared first so the handler observes an idle matcher
            self.record.clear();
            debug!(binding = binding.identifier(), "matched");
            binding.invoke();
            return Outcome::Matched { index };
        }

        if self.table.is_prefix(&self.record) {
            return Outcome::Pending;
        }

        trace!("no binding can match, resetting");
        self.record.clear();
        Outcome::Reset
    }
}

impl<C: Clock + std::fmt::Debug> std::fmt::Debug for SequenceMatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceMatcher")
            .field("table", &self.table)
            .field("record", &self.record)
            .field("stamp", &self.stamp)
            .field("timeout", &self.timeout)
            .field("clock", &self.clock)
            .finish()
    }
}
