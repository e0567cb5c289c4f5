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

//! Sequence matcher tests
//!
//! Time is driven by a ManualClock so timeout behaviour is deterministic.

use crate::core::clock::{Clock, ManualClock};
use crate::core::key::Key;
use crate::core::matcher::{Outcome, SequenceMatcher, DEFAULT_TIMEOUT};
use crate::core::types::{Keystroke, Modifiers};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const NONE: Modifiers = Modifiers::empty();

/// Records which handlers ran, in order
#[derive(Clone, Default)]
struct Log(Arc<Mutex<Vec<&'static str>>>);

impl Log {
    fn push(&self, name: &'static str) {
        self.0.lock().unwrap().push(name);
    }

    fn take(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// Helper: matcher with the canonical example bindings
///
/// "s" → A, "ctrl+s"/"command+s" → B, "t e s t" → C, "#" → D
fn example_matcher() -> (SequenceMatcher<ManualClock>, ManualClock, Log) {
    let clock = ManualClock::new();
    let log = Log::default();
    let mut matcher = SequenceMatcher::with_clock(clock.clone());

    for (descriptors, name) in [
        (&["s"][..], "A"),
        (&["ctrl+s", "command+s"][..], "B"),
        (&["t e s t"][..], "C"),
        (&["#"][..], "D"),
    ] {
        let log = log.clone();
        matcher.bind(descriptors, move || log.push(name));
    }

    (matcher, clock, log)
}

fn type_keys(
    matcher: &mut SequenceMatcher<ManualClock>,
    clock: &ManualClock,
    keys: &[Key],
    gap: Duration,
) -> Vec<Outcome> {
    keys.iter()
        .map(|&key| {
            clock.advance(gap);
            matcher.record_key(key, NONE)
        })
        .collect()
}

#[test]
fn test_default_timeout() {
    let matcher = SequenceMatcher::new();
    assert_eq!(matcher.timeout(), Duration::from_millis(500));
    assert_eq!(matcher.timeout(), DEFAULT_TIMEOUT);
}

#[test]
fn test_single_key_fires() {
    let (mut matcher, _clock, log) = example_matcher();

    assert_eq!(matcher.record_key(Key::S, NONE), Outcome::Matched { index: 0 });
    assert_eq!(log.take(), vec!["A"]);
    assert!(matcher.recorded().is_empty());
}

#[test]
fn test_modifier_chord_fires_its_own_binding() {
    let (mut matcher, _clock, log) = example_matcher();

    assert_eq!(matcher.record_key(Key::S, Modifiers::CTRL), Outcome::Matched { index: 1 });
    assert_eq!(matcher.record_key(Key::S, Modifiers::SUPER), Outcome::Matched { index: 2 });
    assert_eq!(log.take(), vec!["B", "B"]);
}

#[test]
fn test_extra_modifiers_do_not_match() {
    let (mut matcher, _clock, log) = example_matcher();

    assert_eq!(
        matcher.record_key(Key::S, Modifiers::CTRL | Modifiers::SHIFT),
        Outcome::Reset
    );
    assert!(log.take().is_empty());
}

#[test]
fn test_sequence_fires_only_on_last_key() {
    let (mut matcher, clock, log) = example_matcher();

    let outcomes = type_keys(
        &mut matcher,
        &clock,
        &[Key::T, Key::E, Key::S, Key::T],
        Duration::from_millis(100),
    );

    assert_eq!(
        outcomes,
        vec![
            Outcome::Pending,
            Outcome::Pending,
            // "t e s" is not "s": no full match at length 3
            Outcome::Pending,
            Outcome::Matched { index: 3 },
        ]
    );
    assert_eq!(log.take(), vec!["C"]);
    assert!(matcher.recorded().is_empty());
}

#[test]
fn test_symbol_key_fires() {
    let (mut matcher, _clock, log) = example_matcher();

    assert_eq!(matcher.record_key(Key::Hash, NONE), Outcome::Matched { index: 4 });
    assert_eq!(log.take(), vec!["D"]);
}

#[test]
fn test_timeout_discards_partial_sequence() {
    let (mut matcher, clock, log) = example_matcher();

    type_keys(&mut matcher, &clock, &[Key::T, Key::E], Duration::from_millis(100));
    clock.advance(DEFAULT_TIMEOUT + Duration::from_millis(1));

    // Stale "t e" is dropped, so this "s" stands alone and fires A
    assert_eq!(matcher.record_key(Key::S, NONE), Outcome::Matched { index: 0 });
    assert_eq!(matcher.record_key(Key::T, NONE), Outcome::Pending);
    assert_eq!(log.take(), vec!["A"]);
}

#[test]
fn test_gap_over_timeout_never_fires_sequence() {
    let (mut matcher, clock, log) = example_matcher();

    let outcomes = type_keys(
        &mut matcher,
        &clock,
        &[Key::T, Key::E, Key::S, Key::T],
        Duration::from_millis(600),
    );

    // Each key starts over: t, e (reset), s (fires A), t
    assert_eq!(
        outcomes,
        vec![
            Outcome::Pending,
            Outcome::Reset,
            Outcome::Matched { index: 0 },
            Outcome::Pending,
        ]
    );
    assert_eq!(log.take(), vec!["A"]);
    assert_eq!(matcher.recorded(), &[Keystroke::from(Key::T)]);
}

#[test]
fn test_gap_equal_to_timeout_is_still_in_time() {
    let (mut matcher, clock, log) = example_matcher();

    let outcomes = type_keys(&mut matcher, &clock, &[Key::T, Key::E, Key::S, Key::T], DEFAULT_TIMEOUT);

    assert_eq!(outcomes.last(), Some(&Outcome::Matched { index: 3 }));
    assert_eq!(log.take(), vec!["C"]);
}

#[test]
fn test_non_prefix_key_resets_buffer() {
    let (mut matcher, _clock, log) = example_matcher();

    assert_eq!(matcher.record_key(Key::T, NONE), Outcome::Pending);
    assert_eq!(matcher.recorded().len(), 1);

    assert_eq!(matcher.record_key(Key::X, NONE), Outcome::Reset);
    assert!(matcher.recorded().is_empty());

    // The rejected key is not kept around as the start of a new sequence
    assert_eq!(matcher.record_key(Key::E, NONE), Outcome::Reset);
    assert!(log.take().is_empty());
}

#[test]
fn test_unbound_key_with_no_bindings() {
    let mut matcher = SequenceMatcher::with_clock(ManualClock::new());
    assert_eq!(matcher.record_key(Key::A, NONE), Outcome::Reset);
    assert!(matcher.recorded().is_empty());
}

#[test]
fn test_set_timeout_nanosecond_granularity() {
    let (mut matcher, clock, log) = example_matcher();
    matcher.set_timeout(Duration::from_nanos(1_000));
    assert_eq!(matcher.timeout(), Duration::from_nanos(1_000));

    matcher.record_key(Key::T, NONE);
    clock.advance(Duration::from_nanos(1_001));
    assert_eq!(matcher.record_key(Key::E, NONE), Outcome::Reset);

    matcher.record_key(Key::T, NONE);
    clock.advance(Duration::from_nanos(1_000));
    assert_eq!(matcher.record_key(Key::E, NONE), Outcome::Pending);
    assert!(log.take().is_empty());
}

#[test]
fn test_record_key_at_with_backwards_time() {
    let (mut matcher, clock, log) = example_matcher();
    let start = clock.now();
    let later = start + Duration::from_secs(10);

    assert_eq!(matcher.record_key_at(Key::T, NONE, later), Outcome::Pending);
    // Earlier instant than the last stamp: treated as no time passing
    assert_eq!(matcher.record_key_at(Key::E, NONE, start), Outcome::Pending);
    assert_eq!(matcher.record_key_at(Key::S, NONE, start), Outcome::Pending);
    assert_eq!(matcher.record_key_at(Key::T, NONE, start), Outcome::Matched { index: 3 });
    assert_eq!(log.take(), vec!["C"]);
}

#[test]
fn test_reset_drops_partial_sequence() {
    let (mut matcher, _clock, log) = example_matcher();

    matcher.record_key(Key::T, NONE);
    matcher.record_key(Key::E, NONE);
    matcher.reset();

    assert!(matcher.recorded().is_empty());
    assert_eq!(matcher.record_key(Key::S, NONE), Outcome::Matched { index: 0 });
    assert_eq!(log.take(), vec!["A"]);
}

#[test]
fn test_duplicate_sequences_fire_first_binding_once() {
    let clock = ManualClock::new();
    let log = Log::default();
    let mut matcher = SequenceMatcher::with_clock(clock);

    let first = log.clone();
    matcher.bind(&["ctrl+s"], move || first.push("first"));
    let second = log.clone();
    matcher.bind(&["Control+S"], move || second.push("second"));

    assert_eq!(matcher.record_key(Key::S, Modifiers::CTRL), Outcome::Matched { index: 0 });
    assert_eq!(log.take(), vec!["first"]);
}

#[test]
fn test_shorter_binding_wins_over_longer_one_with_same_prefix() {
    let log = Log::default();
    let mut matcher = SequenceMatcher::with_clock(ManualClock::new());

    let short = log.clone();
    matcher.bind(&["g"], move || short.push("g"));
    let long = log.clone();
    matcher.bind(&["g g"], move || long.push("g g"));

    matcher.record_key(Key::G, NONE);
    matcher.record_key(Key::G, NONE);
    assert_eq!(log.take(), vec!["g", "g"]);
}

#[test]
fn test_unbind_and_clear_stop_matching() {
    let (mut matcher, _clock, log) = example_matcher();

    matcher.unbind("S");
    assert_eq!(matcher.record_key(Key::S, NONE), Outcome::Reset);

    matcher.clear();
    assert!(matcher.bindings().is_empty());
    assert_eq!(matcher.record_key(Key::S, Modifiers::CTRL), Outcome::Reset);
    assert!(log.take().is_empty());
}

#[test]
fn test_call_ignores_recording_state() {
    let (mut matcher, _clock, log) = example_matcher();

    matcher.record_key(Key::T, NONE);
    assert!(matcher.call("T E S T"));
    assert!(!matcher.call("nope"));

    // The partial sequence is untouched by call
    assert_eq!(matcher.recorded(), &[Keystroke::from(Key::T)]);
    assert_eq!(log.take(), vec!["C"]);
}

#[test]
fn test_try_bind_through_matcher() {
    let mut matcher = SequenceMatcher::with_clock(ManualClock::new());

    assert!(matcher.try_bind(&["ctrl+nope"], || {}).is_err());
    assert!(matcher.bindings().is_empty());

    matcher.try_bind(&["ctrl+k ctrl+c"], || {}).unwrap();
    assert_eq!(matcher.record_key(Key::K, Modifiers::CTRL), Outcome::Pending);
    assert_eq!(
        matcher.record_key(Key::C, Modifiers::CTRL),
        Outcome::Matched { index: 0 }
    );
}

#[test]
#[should_panic(expected = "handler failed")]
fn test_handler_panics_propagate() {
    let mut matcher = SequenceMatcher::with_clock(ManualClock::new());
    matcher.bind(&["a"], || panic!("handler failed"));
    matcher.record_key(Key::A, NONE);
}

#[test]
fn test_buffer_cleared_before_handler_runs() {
    let mut matcher = SequenceMatcher::with_clock(ManualClock::new());
    matcher.bind(&["t e"], || panic!("handler failed"));

    assert_eq!(matcher.record_key(Key::T, NONE), Outcome::Pending);
    assert_eq!(matcher.recorded().len(), 1);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        matcher.record_key(Key::E, NONE);
    }));

    assert!(result.is_err());
    assert!(matcher.recorded().is_empty());
}
