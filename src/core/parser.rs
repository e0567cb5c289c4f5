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

//! src/core/parser.rs
//!
//! Binding descriptor and bindings file parser
//!
//! A descriptor is a whitespace-separated list of chords. A chord is one or
//! more `+`-joined tokens: any number of modifiers followed by exactly one
//! key name.
//!
//! ```text
//! descriptor = chord (ws chord)*
//! chord      = (modifier "+")* key
//! modifier   = "ctrl" | "control" | "shift" | "alt" | "option"
//!            | "super" | "command" | "cmd" | "meta" | "win"
//! key        = canonical key name | alias | "+"
//! ```
//!
//! Two flavours are offered:
//! - [`parse_descriptor`] never fails. Anything it cannot make sense of
//!   becomes `Key::Unknown` and a warning is logged.
//! - [`parse_descriptor_strict`] rejects the same input with a [`ParseError`].
//!
//! The bindings file format reuses descriptors:
//!
//! ```text
//! # comment
//! timeout = 750
//! bind = ctrl+s, save
//! bind = t e s t, test
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map_res},
    multi::separated_list1,
    IResult, Parser,
};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::core::key::Key;
use crate::core::types::{BindingEntry, Keystroke, Modifiers};

/// Parse errors for descriptors and bindings files
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Empty key descriptor")]
    Empty,

    #[error("Malformed chord '{chord}' in '{descriptor}'")]
    InvalidChord { descriptor: String, chord: String },

    #[error("Unknown key '{token}' in '{descriptor}'")]
    UnknownKey { descriptor: String, token: String },

    #[error("Unknown modifier '{token}' in '{descriptor}'")]
    UnknownModifier { descriptor: String, token: String },

    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },
}

/// Contents of a bindings file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BindingsFile {
    /// Sequence timeout override from a `timeout = <ms>` line
    pub timeout: Option<Duration>,

    /// `bind` lines in file order
    pub entries: Vec<BindingEntry>,
}

/// Parse a descriptor, degrading unrecognised chords to `Key::Unknown`
///
/// Recognised modifiers on a chord are kept even when its key is not, so
/// `"ctrl+nope"` becomes ctrl+unknown. An empty or all-whitespace
/// descriptor yields an empty sequence.
///
/// # Example
/// ```
/// use keyseq::core::parser::parse_descriptor;
/// use keyseq::{Key, Keystroke, Modifiers};
///
/// let keys = parse_descriptor("ctrl+x s");
/// assert_eq!(keys, vec![
///     Keystroke::new(Key::X, Modifiers::CTRL),
///     Keystroke::new(Key::S, Modifiers::empty()),
/// ]);
/// ```
pub fn parse_descriptor(descriptor: &str) -> Vec<Keystroke> {
    descriptor
        .split_whitespace()
        .map(|chord| lenient_keystroke(descriptor, chord))
        .collect()
}

/// Parse a descriptor, rejecting anything that is not a known key
pub fn parse_descriptor_strict(descriptor: &str) -> Result<Vec<Keystroke>, ParseError> {
    let keys = descriptor
        .split_whitespace()
        .map(|chord| parse_keystroke(descriptor, chord))
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(keys)
}

/// Parse a single chord such as `"ctrl+shift+s"` into a keystroke
///
/// `descriptor` is only used for error context.
pub fn parse_keystroke(descriptor: &str, chord: &str) -> Result<Keystroke, ParseError> {
    let invalid = || ParseError::InvalidChord {
        descriptor: descriptor.to_string(),
        chord: chord.to_string(),
    };

    let (_, tokens) = parse_chord(chord).map_err(|_| invalid())?;
    let (key_token, modifier_tokens) = tokens.split_last().ok_or_else(invalid)?;

    let mut modifiers = Modifiers::empty();
    for token in modifier_tokens {
        modifiers |= parse_modifier(token).ok_or_else(|| ParseError::UnknownModifier {
            descriptor: descriptor.to_string(),
            token: token.to_string(),
        })?;
    }

    let key = Key::from_name(key_token).ok_or_else(|| ParseError::UnknownKey {
        descriptor: descriptor.to_string(),
        token: key_token.to_string(),
    })?;

    Ok(Keystroke::new(key, modifiers))
}

fn lenient_keystroke(descriptor: &str, chord: &str) -> Keystroke {
    let Ok((_, tokens)) = parse_chord(chord) else {
        warn!(descriptor, chord, "malformed chord, binding as unknown key");
        return Keystroke::UNKNOWN;
    };

    let Some((key_token, modifier_tokens)) = tokens.split_last() else {
        return Keystroke::UNKNOWN;
    };

    let mut modifiers = Modifiers::empty();
    let mut key = Key::from_name(key_token);

    for token in modifier_tokens {
        match parse_modifier(token) {
            Some(modifier) => modifiers |= modifier,
            // A key name in modifier position poisons the whole chord
            None => key = None,
        }
    }

    if key.is_none() {
        warn!(descriptor, chord, "unrecognised key, binding as unknown key");
    }

    Keystroke::new(key.unwrap_or(Key::Unknown), modifiers)
}

/// Split a chord into its `+`-joined tokens
///
/// A token is either a run of characters other than `+` and whitespace, or a
/// lone `+` (the plus key). `"ctrl++"` therefore splits into `["ctrl", "+"]`.
/// The whole chord must be consumed.
pub fn parse_chord(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char('+'), chord_token)).parse(input)
}

fn chord_token(input: &str) -> IResult<&str, &str> {
    alt((
        take_while1(|c: char| c != '+' && !c.is_whitespace()),
        tag("+"),
    ))
    .parse(input)
}

/// Map a modifier name to its flag
///
/// Handles:
/// - "ctrl", "control" → CTRL
/// - "shift" → SHIFT
/// - "alt", "option" → ALT
/// - "super", "command", "cmd", "meta", "win" → SUPER
pub fn parse_modifier(token: &str) -> Option<Modifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "shift" => Some(Modifiers::SHIFT),
        "alt" | "option" => Some(Modifiers::ALT),
        "super" | "command" | "cmd" | "meta" | "win" => Some(Modifiers::SUPER),
        _ => None,
    }
}

/// Parse a complete bindings file
///
/// Blank lines and lines starting with `#` are skipped. Every other line must
/// be a `bind` or `timeout` statement. Descriptors are kept as text here;
/// turning them into keystrokes is up to the caller.
///
/// # Example
/// ```ignore
/// let content = std::fs::read_to_string("keys.conf")?;
/// let file = parse_bindings_file(&content)?;
/// ```
pub fn parse_bindings_file(content: &str) -> Result<BindingsFile, ParseError> {
    let mut file = BindingsFile::default();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let syntax_error = |e: nom::Err<nom::error::Error<&str>>| ParseError::InvalidSyntax {
            line: line_num,
            message: format!("{:?}", e),
        };

        if line_trimmed.starts_with("bind") {
            let (_, (descriptor, action)) = parse_bind_line(line_trimmed).map_err(syntax_error)?;
            file.entries.push(BindingEntry {
                descriptor,
                action,
                line: line_num,
            });
        } else if line_trimmed.starts_with("timeout") {
            let (_, timeout) = parse_timeout_line(line_trimmed).map_err(syntax_error)?;
            file.timeout = Some(timeout);
        } else {
            return Err(ParseError::InvalidSyntax {
                line: line_num,
                message: format!("unknown statement '{}'", line_trimmed),
            });
        }
    }

    Ok(file)
}

/// Parse a single bind line
///
/// Format: bind = DESCRIPTOR, ACTION
/// Example: bind = ctrl+s, save
///
/// The descriptor runs up to the first comma, so a literal comma key has to
/// be written as `comma`.
pub fn parse_bind_line(input: &str) -> IResult<&str, (String, String)> {
    let (input, _) = (tag("bind"), space0, char('='), space0).parse(input)?;
    let (input, descriptor) = take_until(",")(input)?;
    let (input, _) = (char(','), space0).parse(input)?;
    let (input, action) = take_while1(|c: char| c != '\n')(input)?;

    Ok((
        input,
        (descriptor.trim().to_string(), action.trim().to_string()),
    ))
}

/// Parse `timeout = <milliseconds>`
pub fn parse_timeout_line(input: &str) -> IResult<&str, Duration> {
    let (input, (_, _, _, _, millis, _)) = all_consuming((
        tag("timeout"),
        space0,
        char('='),
        space0,
        map_res(digit1, |digits: &str| digits.parse::<u64>()),
        space0,
    ))
    .parse(input)?;

    Ok((input, Duration::from_millis(millis)))
}
