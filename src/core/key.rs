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

//! src/core/key.rs
//!
//! The closed set of keys the matcher understands
//!
//! Every key has a numeric code (its position in the declaration, with
//! `Unknown` at 0) and exactly one canonical lowercase name. The canonical
//! names are what descriptors use: letters and digits as themselves,
//! punctuation taken literally (`#`, `[`, `+`), and words for everything
//! else (`escape`, `pageup`, `f12`, `kp7`).
//!
//! Adapters translate their native codes into these variants; the matcher
//! never sees anything backend-specific.

use std::fmt;

macro_rules! keys {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// A physical or logical key.
        ///
        /// `Unknown` is the sentinel produced for unrecognised key names and
        /// is what adapters should report for keys they cannot map.
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[repr(u16)]
        pub enum Key {
            #[default]
            Unknown,
            $($variant),*
        }

        impl Key {
            /// Every key in code order. `Key::ALL[k.code() as usize] == k`.
            pub const ALL: &'static [Key] = &[Key::Unknown, $(Key::$variant),*];

            /// Canonical descriptor name.
            pub fn name(self) -> &'static str {
                match self {
                    Key::Unknown => "unknown",
                    $(Key::$variant => $name),*
                }
            }

            fn from_canonical(name: &str) -> Option<Key> {
                match name {
                    $($name => Some(Key::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keys! {
    A => "a", B => "b", C => "c", D => "d", E => "e", F => "f", G => "g",
    H => "h", I => "i", J => "j", K => "k", L => "l", M => "m", N => "n",
    O => "o", P => "p", Q => "q", R => "r", S => "s", T => "t", U => "u",
    V => "v", W => "w", X => "x", Y => "y", Z => "z",

    Num0 => "0", Num1 => "1", Num2 => "2", Num3 => "3", Num4 => "4",
    Num5 => "5", Num6 => "6", Num7 => "7", Num8 => "8", Num9 => "9",

    Apostrophe => "'",
    Comma => ",",
    Minus => "-",
    Period => ".",
    Slash => "/",
    Semicolon => ";",
    Equal => "=",
    LeftBracket => "[",
    Backslash => "\\",
    RightBracket => "]",
    GraveAccent => "`",

    Exclamation => "!",
    At => "@",
    Hash => "#",
    Dollar => "$",
    Percent => "%",
    Caret => "^",
    Ampersand => "&",
    Asterisk => "*",
    LeftParen => "(",
    RightParen => ")",
    Underscore => "_",
    Plus => "+",
    LeftBrace => "{",
    RightBrace => "}",
    Pipe => "|",
    Colon => ":",
    DoubleQuote => "\"",
    Less => "<",
    Greater => ">",
    Question => "?",
    Tilde => "~",

    Space => "space",
    Escape => "escape",
    Enter => "enter",
    Tab => "tab",
    Backspace => "backspace",
    Insert => "insert",
    Delete => "delete",
    Right => "right",
    Left => "left",
    Down => "down",
    Up => "up",
    PageUp => "pageup",
    PageDown => "pagedown",
    Home => "home",
    End => "end",
    CapsLock => "capslock",
    ScrollLock => "scrolllock",
    NumLock => "numlock",
    PrintScreen => "printscreen",
    Pause => "pause",
    Menu => "menu",

    F1 => "f1", F2 => "f2", F3 => "f3", F4 => "f4", F5 => "f5", F6 => "f6",
    F7 => "f7", F8 => "f8", F9 => "f9", F10 => "f10", F11 => "f11",
    F12 => "f12", F13 => "f13", F14 => "f14", F15 => "f15", F16 => "f16",
    F17 => "f17", F18 => "f18", F19 => "f19", F20 => "f20", F21 => "f21",
    F22 => "f22", F23 => "f23", F24 => "f24",

    Kp0 => "kp0", Kp1 => "kp1", Kp2 => "kp2", Kp3 => "kp3", Kp4 => "kp4",
    Kp5 => "kp5", Kp6 => "kp6", Kp7 => "kp7", Kp8 => "kp8", Kp9 => "kp9",
    KpDecimal => "kpdecimal",
    KpDivide => "kpdivide",
    KpMultiply => "kpmultiply",
    KpSubtract => "kpsubtract",
    KpAdd => "kpadd",
    KpEnter => "kpenter",
    KpEqual => "kpequal",
}

impl Key {
    /// Looks up a key by descriptor name, case-insensitively.
    ///
    /// Accepts canonical names plus a handful of common aliases
    /// (`esc`, `return`, `del`, `pgup`, `plus`, `comma`, ...).
    pub fn from_name(name: &str) -> Option<Key> {
        let lower = name.to_ascii_lowercase();

        Key::from_canonical(&lower).or_else(|| match lower.as_str() {
            "esc" => Some(Key::Escape),
            "return" => Some(Key::Enter),
            "del" => Some(Key::Delete),
            "ins" => Some(Key::Insert),
            "pgup" => Some(Key::PageUp),
            "pgdn" => Some(Key::PageDown),
            "spacebar" => Some(Key::Space),
            "plus" => Some(Key::Plus),
            "comma" => Some(Key::Comma),
            "minus" => Some(Key::Minus),
            "hash" => Some(Key::Hash),
            _ => None,
        })
    }

    /// Numeric code, used in the low half of an encoded keystroke.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Inverse of [`Key::code`]; out-of-range codes map to `Unknown`.
    pub fn from_code(code: u16) -> Key {
        Key::ALL.get(usize::from(code)).copied().unwrap_or(Key::Unknown)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
