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

//! Ordered table of registered bindings
//!
//! Bindings keep their insertion order, which is both the listing order and
//! the tie-break when two bindings share a key sequence. Lookup by
//! identifier is case-insensitive; matching of key sequences is exact.

use tracing::debug;

use crate::core::parser::{parse_descriptor, parse_descriptor_strict, ParseError};
use crate::core::types::{Binding, Handler, Keystroke};

/// The set of registered bindings.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every descriptor to `handler`.
    ///
    /// Parsing is permissive: unrecognised keys become `Key::Unknown`.
    /// Descriptors that contain no chords at all are skipped.
    pub fn bind(&mut self, descriptors: &[&str], handler: Handler) {
        for descriptor in descriptors {
            let keys = parse_descriptor(descriptor);
            if keys.is_empty() {
                debug!(descriptor, "skipping empty descriptor");
                continue;
            }

            debug!(descriptor, len = keys.len(), "bind");
            self.bindings
                .push(Binding::new(descriptor, keys, handler.clone()));
        }
    }

    /// Binds every descriptor to `handler`, or none of them.
    ///
    /// All descriptors are parsed strictly before anything is inserted, so a
    /// single bad descriptor leaves the table untouched.
    pub fn try_bind(&mut self, descriptors: &[&str], handler: Handler) -> Result<(), ParseError> {
        let parsed = descriptors
            .iter()
            .map(|descriptor| parse_descriptor_strict(descriptor).map(|keys| (*descriptor, keys)))
            .collect::<Result<Vec<_>, _>>()?;

        for (descriptor, keys) in parsed {
            debug!(descriptor, len = keys.len(), "bind");
            self.bindings
                .push(Binding::new(descriptor, keys, handler.clone()));
        }

        Ok(())
    }

    /// Removes the first binding named `identifier`. Silent if absent.
    pub fn unbind(&mut self, identifier: &str) {
        if let Some(idx) = self.index(identifier) {
            debug!(identifier, "unbind");
            self.bindings.remove(idx);
        }
    }

    /// Removes every binding, dropping their handlers.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Bindings in insertion order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn find(&self, identifier: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.is_named(identifier))
    }

    /// Invokes the handler bound as `identifier`, if any.
    ///
    /// Returns whether a handler ran.
    pub fn call(&self, identifier: &str) -> bool {
        match self.find(identifier) {
            Some(binding) => {
                binding.invoke();
                true
            }
            None => false,
        }
    }

    /// First binding whose sequence is exactly `record`.
    pub fn full_match(&self, record: &[Keystroke]) -> Option<(usize, &Binding)> {
        self.bindings
            .iter()
            .enumerate()
            .find(|(_, b)| b.keys() == record)
    }

    /// Whether `record` is a strict prefix of some longer binding.
    pub fn is_prefix(&self, record: &[Keystroke]) -> bool {
        self.bindings
            .iter()
            .any(|b| b.keys().len() > record.len() && b.keys().starts_with(record))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn index(&self, identifier: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.is_named(identifier))
    }
}
