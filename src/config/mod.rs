//! Engine configuration and bindings file loading.
//!
//! Configuration comes from three places, later ones winning:
//!
//! - **Defaults**: 500ms sequence timeout, permissive descriptor parsing
//! - **Environment**: `KEYSEQ_TIMEOUT_MS`, `KEYSEQ_STRICT`
//! - **Bindings file**: a `timeout = <ms>` line
//!
//! # Example
//!
//! ```no_run
//! use keyseq::config::{self, EngineConfig};
//! use keyseq::core::handler;
//! use keyseq::SystemClock;
//! use std::path::Path;
//!
//! let config = EngineConfig::from_env();
//! let file = config::load_bindings(Path::new("keys.conf"), &config)?;
//!
//! let mut matcher = config.build(SystemClock);
//! config::install(&file, &mut matcher, |entry| {
//!     let action = entry.action.clone();
//!     handler(move || println!("{action}"))
//! });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::clock::Clock;
use crate::core::matcher::{SequenceMatcher, DEFAULT_TIMEOUT};
use crate::core::parser::{parse_bindings_file, parse_descriptor_strict, BindingsFile};
use crate::core::types::{BindingEntry, Handler};

/// Environment variable overriding the sequence timeout, in milliseconds.
pub const TIMEOUT_ENV: &str = "KEYSEQ_TIMEOUT_MS";

/// Environment variable enabling strict descriptor parsing.
pub const STRICT_ENV: &str = "KEYSEQ_STRICT";

/// Settings for building a [`SequenceMatcher`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Maximum gap between keys of one sequence.
    /// Default: 500ms.
    pub timeout: Duration,

    /// Reject bindings-file descriptors containing unknown keys instead of
    /// binding them as `Key::Unknown`.
    /// Default: false.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            strict: false,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Load config from the process environment.
    ///
    /// Reads:
    /// - `KEYSEQ_TIMEOUT_MS`: sequence timeout in milliseconds
    /// - `KEYSEQ_STRICT`: "1" or "true" enables strict parsing
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = lookup(TIMEOUT_ENV).and_then(|val| val.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_millis(ms);
        }

        if let Some(val) = lookup(STRICT_ENV) {
            let val = val.trim();
            config.strict = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config
    }

    /// Creates a matcher on `clock` using these settings.
    pub fn build<C: Clock>(&self, clock: C) -> SequenceMatcher<C> {
        let mut matcher = SequenceMatcher::with_clock(clock);
        matcher.set_timeout(self.timeout);
        matcher
    }
}

/// Reads and parses a bindings file.
///
/// With `config.strict` set, every descriptor must parse strictly; the first
/// failure is reported with its line number.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file doesn't exist,
/// `ConfigError::Parse` for syntax errors and
/// `ConfigError::InvalidDescriptor` for rejected descriptors.
pub fn load_bindings(path: &Path, config: &EngineConfig) -> Result<BindingsFile, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let file = parse_bindings_file(&content)?;

    if config.strict {
        for entry in &file.entries {
            parse_descriptor_strict(&entry.descriptor).map_err(|source| {
                ConfigError::InvalidDescriptor {
                    line: entry.line,
                    source,
                }
            })?;
        }
    }

    info!(path = %path.display(), bindings = file.entries.len(), "loaded bindings");
    Ok(file)
}

/// Registers every entry of `file` on `matcher`.
///
/// `make_handler` maps each entry (usually by its action label) to the
/// handler it should run. A timeout in the file replaces the matcher's.
pub fn install<C, F>(file: &BindingsFile, matcher: &mut SequenceMatcher<C>, mut make_handler: F)
where
    C: Clock,
    F: FnMut(&BindingEntry) -> Handler,
{
    if let Some(timeout) = file.timeout {
        debug!(?timeout, "timeout from bindings file");
        matcher.set_timeout(timeout);
    }

    for entry in &file.entries {
        let handler = make_handler(entry);
        matcher
            .table_mut()
            .bind(&[entry.descriptor.as_str()], handler);
    }
}

#[cfg(test)]
mod tests;
