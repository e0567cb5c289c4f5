//! Detection of bindings that can never fire
//!
//! Bindings are allowed to overlap, but some overlaps make a binding dead:
//!
//! - **Duplicate**: two bindings share a key sequence. The matcher always
//!   picks the first in table order, so the rest never run.
//! - **Shadowed**: a binding's sequence starts with another, shorter bound
//!   sequence (`"g"` and `"g g"`). The short one fires and clears the record
//!   before the long one can complete.
//! - **UnknownKey**: a sequence contains `Key::Unknown`, usually from a typo
//!   in the descriptor. It only matches keys the adapter could not map.
//!
//! # Performance
//! - Add binding: O(1) average case
//! - Duplicate check: O(1) average case via the sequence index
//! - Shadow check: O(n · L) where L is the longest sequence length

use std::collections::HashMap;

use crate::core::table::BindingTable;
use crate::core::types::Keystroke;

/// Why a group of bindings was flagged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConflictKind {
    Duplicate,
    Shadowed,
    UnknownKey,
}

/// A detected conflict.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conflict {
    pub kind: ConflictKind,

    /// The sequence at issue: the shared sequence for duplicates, the
    /// unreachable sequence for shadowed and unknown-key bindings
    pub sequence: Vec<Keystroke>,

    /// Identifiers involved, in table order. For shadowing the shadowing
    /// binding comes first.
    pub identifiers: Vec<String>,
}

/// Collects bindings and reports conflicts between them.
#[derive(Debug, Default)]
pub struct ConflictDetector {
    /// (identifier, sequence) in insertion order
    entries: Vec<(String, Vec<Keystroke>)>,

    /// Maps each sequence to the entry indices using it
    by_sequence: HashMap<Vec<Keystroke>, Vec<usize>>,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a detector over every binding in `table`.
    pub fn from_table(table: &BindingTable) -> Self {
        let mut detector = Self::new();
        for binding in table.bindings() {
            detector.add_binding(binding.identifier(), binding.keys());
        }
        detector
    }

    /// Adds a binding to the detector.
    ///
    /// Time complexity: O(1) average case
    pub fn add_binding(&mut self, identifier: &str, keys: &[Keystroke]) {
        let idx = self.entries.len();
        self.entries.push((identifier.to_string(), keys.to_vec()));
        self.by_sequence.entry(keys.to_vec()).or_default().push(idx);
    }

    /// Finds all conflicts, ordered by first appearance in the table.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for (idx, (identifier, keys)) in self.entries.iter().enumerate() {
            // Duplicates are reported once, at the first binding of the group
            if let Some(group) = self.by_sequence.get(keys) {
                if group.len() > 1 && group[0] == idx {
                    conflicts.push(Conflict {
                        kind: ConflictKind::Duplicate,
                        sequence: keys.clone(),
                        identifiers: group.iter().map(|&i| self.entries[i].0.clone()).collect(),
                    });
                }
            }

            if let Some(shadow) = self.shortest_bound_prefix(keys) {
                conflicts.push(Conflict {
                    kind: ConflictKind::Shadowed,
                    sequence: keys.clone(),
                    identifiers: vec![self.entries[shadow].0.clone(), identifier.clone()],
                });
            }

            if keys.iter().any(|k| k.is_unknown()) {
                conflicts.push(Conflict {
                    kind: ConflictKind::UnknownKey,
                    sequence: keys.clone(),
                    identifiers: vec![identifier.clone()],
                });
            }
        }

        conflicts
    }

    /// Checks whether a specific sequence is bound more than once.
    pub fn has_conflict(&self, keys: &[Keystroke]) -> bool {
        self.by_sequence
            .get(keys)
            .map(|group| group.len() > 1)
            .unwrap_or(false)
    }

    /// Returns the total number of bindings tracked.
    pub fn total_bindings(&self) -> usize {
        self.entries.len()
    }

    /// First-bound entry whose sequence is a strict prefix of `keys`.
    fn shortest_bound_prefix(&self, keys: &[Keystroke]) -> Option<usize> {
        (1..keys.len())
            .filter_map(|len| self.by_sequence.get(&keys[..len]))
            .map(|group| group[0])
            .next()
    }
}
