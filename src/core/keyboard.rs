//! Capability interface for input adapters
//!
//! An adapter (evdev, a windowing toolkit, a terminal, a script) turns its
//! native events into `(Key, Modifiers)` pairs and drives a [`Keyboard`].
//! Adapters hold the engine by reference and own nothing but their own
//! translation state, such as which modifiers are currently held.

use std::time::Duration;

use crate::core::clock::Clock;
use crate::core::key::Key;
use crate::core::matcher::{Outcome, SequenceMatcher};
use crate::core::types::{Binding, Handler, Modifiers};

/// The operations an adapter or application may invoke on the engine.
pub trait Keyboard {
    /// Binds each descriptor to `handler`, parsing permissively.
    fn bind(&mut self, descriptors: &[&str], handler: Handler);

    fn unbind(&mut self, identifier: &str);

    fn clear(&mut self);

    fn bindings(&self) -> &[Binding];

    /// Invokes a handler by identifier. Returns whether one ran.
    fn call(&self, identifier: &str) -> bool;

    fn set_timeout(&mut self, timeout: Duration);

    /// Feeds one key press.
    fn record_key(&mut self, key: Key, modifiers: Modifiers) -> Outcome;
}

impl<C: Clock> Keyboard for SequenceMatcher<C> {
    fn bind(&mut self, descriptors: &[&str], handler: Handler) {
        self.table_mut().bind(descriptors, handler);
    }

    fn unbind(&mut self, identifier: &str) {
        SequenceMatcher::unbind(self, identifier);
    }

    fn clear(&mut self) {
        SequenceMatcher::clear(self);
    }

    fn bindings(&self) -> &[Binding] {
        SequenceMatcher::bindings(self)
    }

    fn call(&self, identifier: &str) -> bool {
        SequenceMatcher::call(self, identifier)
    }

    fn set_timeout(&mut self, timeout: Duration) {
        SequenceMatcher::set_timeout(self, timeout);
    }

    fn record_key(&mut self, key: Key, modifiers: Modifiers) -> Outcome {
        SequenceMatcher::record_key(self, key, modifiers)
    }
}
