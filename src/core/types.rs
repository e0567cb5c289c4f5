//! src/core/types.rs
//!
//! Core type definitions for key-sequence matching
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Modifiers`: Bitset of held modifier keys (SHIFT, CTRL, ALT, SUPER)
//! - `Keystroke`: A key and its modifiers encoded into one comparable value
//! - `Binding`: A registered key sequence with the handler it triggers
//! - `BindingEntry`: One `bind = ...` line read from a bindings file
//!
//! Keystrokes are compared by exact equality. Binding identifiers are
//! compared case-insensitively; that comparison lives in the binding table.

use bitflags::bitflags;
use std::fmt;
use std::sync::Arc;

use crate::core::key::Key;

bitflags! {
    /// Modifier keys held while a key is pressed.
    ///
    /// Adapters track modifier up/down transitions themselves and report the
    /// set that was active when the key went down.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0001;
        /// Control key.
        const CTRL  = 0b0010;
        /// Alt/Option key.
        const ALT   = 0b0100;
        /// Super/Meta/Command/Windows key.
        const SUPER = 0b1000;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ORDER: [(Modifiers, &str); 4] = [
            (Modifiers::CTRL, "ctrl"),
            (Modifiers::ALT, "alt"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::SUPER, "super"),
        ];

        let names = ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join("+");

        f.write_str(&names)
    }
}

/// A key plus modifier set, encoded as a single value
///
/// The modifier bits live in the upper 16 bits and the key code in the lower
/// 16, so two keystrokes are equal exactly when both key and modifiers are.
///
/// # Example
/// ```
/// use keyseq::{Key, Keystroke, Modifiers};
///
/// let save = Keystroke::new(Key::S, Modifiers::CTRL);
/// assert_eq!(save.key(), Key::S);
/// assert_eq!(save.to_string(), "ctrl+s");
/// assert_ne!(save, Keystroke::new(Key::S, Modifiers::empty()));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Keystroke(u32);

impl Keystroke {
    /// The encoded form of `Key::Unknown` with no modifiers.
    pub const UNKNOWN: Keystroke = Keystroke(0);

    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self((u32::from(modifiers.bits()) << 16) | u32::from(key.code()))
    }

    pub fn key(self) -> Key {
        Key::from_code((self.0 & 0xffff) as u16)
    }

    pub fn modifiers(self) -> Modifiers {
        Modifiers::from_bits_truncate((self.0 >> 16) as u8)
    }

    /// The raw encoded value.
    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_unknown(self) -> bool {
        self.key() == Key::Unknown
    }
}

impl From<Key> for Keystroke {
    fn from(key: Key) -> Self {
        Keystroke::new(key, Modifiers::empty())
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.modifiers();
        if modifiers.is_empty() {
            write!(f, "{}", self.key())
        } else {
            write!(f, "{}+{}", modifiers, self.key())
        }
    }
}

impl fmt::Debug for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keystroke({})", self)
    }
}

/// Formats a keystroke sequence in descriptor form (`"ctrl+x ctrl+s"`).
pub fn format_sequence(keys: &[Keystroke]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Callback invoked when a binding fires.
///
/// Handlers are shared: binding `"ctrl+s"` and `"command+s"` in one call
/// gives both bindings the same handler.
pub type Handler = Arc<dyn Fn() + Send + Sync>;

/// Wraps a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A registered key or key sequence
///
/// The identifier is the descriptor text exactly as it was bound; it is what
/// `unbind` and `call` look up and what listings display.
#[derive(Clone)]
pub struct Binding {
    identifier: String,
    keys: Vec<Keystroke>,
    handler: Handler,
}

impl Binding {
    /// Creates a binding. Callers guarantee `keys` is non-empty.
    pub(crate) fn new(identifier: &str, keys: Vec<Keystroke>, handler: Handler) -> Self {
        debug_assert!(!keys.is_empty());
        Self {
            identifier: identifier.to_string(),
            keys,
            handler,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The bound key sequence, modifiers included.
    pub fn keys(&self) -> &[Keystroke] {
        &self.keys
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Runs the handler.
    pub fn invoke(&self) {
        (self.handler)();
    }

    /// Case-insensitive identifier comparison, Unicode-aware.
    pub fn is_named(&self, identifier: &str) -> bool {
        self.identifier
            .chars()
            .flat_map(char::to_lowercase)
            .eq(identifier.chars().flat_map(char::to_lowercase))
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("identifier", &self.identifier)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

/// One binding read from a bindings file
///
/// # Example
/// ```ignore
/// // bind = ctrl+s, save
/// let entry = BindingEntry {
///     descriptor: "ctrl+s".to_string(),
///     action: "save".to_string(),
///     line: 1,
/// };
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindingEntry {
    /// Descriptor text, e.g. "t e s t"
    pub descriptor: String,

    /// Free-form action label the application maps to a handler
    pub action: String,

    /// 1-based line number in the source file
    pub line: usize,
}

impl fmt::Display for BindingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bind = {}, {}", self.descriptor, self.action)
    }
}
