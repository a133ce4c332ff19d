//! Flattened scanner tables.
//!
//! A [`ScanTable`] is the self-contained, serializable end product of the
//! compilation pipeline: the minimized DFA's transition rows laid out in one
//! contiguous row-major array, plus the byte→class map and per-state accept
//! categories. It answers exactly two questions at scan time, both in O(1):
//! where does this state go on this byte, and what category (if any) does
//! this state accept.
//!
//! Sentinels instead of `Option`: [`DEAD_STATE`](crate::DEAD_STATE) marks a missing transition
//! and [`NO_CATEGORY`] a non-accepting state, keeping the arrays flat and the
//! hot path branch-free.

use serde::{Deserialize, Serialize};

use super::partition::AlphabetPartition;
use super::Dfa;
use crate::{Category, ClassId, StateId, NO_CATEGORY};

/// Flattened, immutable scan table. The single input to the runtime and the
/// unit of serialization; it carries everything needed to tokenize without
/// the automata that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTable {
    /// Byte value → equivalence class id, all 256 entries.
    pub byte_to_class: Vec<ClassId>,
    /// Number of equivalence classes (row width).
    pub num_classes: usize,
    /// Number of DFA states (row count).
    pub num_states: usize,
    /// Row-major transition array: `next[state * num_classes + class]`,
    /// [`DEAD_STATE`](crate::DEAD_STATE) where the DFA had no transition.
    pub next: Vec<StateId>,
    /// Per-state accept category, [`NO_CATEGORY`] for non-accepting states.
    pub accept: Vec<Category>,
    /// Start state (always 0 for tables built by the pipeline).
    pub start: StateId,
}

impl ScanTable {
    /// Flatten a DFA and its alphabet partition into a table.
    pub fn from_dfa(dfa: &Dfa, partition: &AlphabetPartition) -> ScanTable {
        let num_states = dfa.states.len();
        let num_classes = dfa.num_classes;

        let mut next = Vec::with_capacity(num_states * num_classes);
        let mut accept = Vec::with_capacity(num_states);
        for state in &dfa.states {
            next.extend_from_slice(&state.transitions);
            accept.push(state.accept.unwrap_or(NO_CATEGORY));
        }

        ScanTable {
            byte_to_class: partition.byte_to_class.to_vec(),
            num_classes,
            num_states,
            next,
            start: dfa.start,
            accept,
        }
    }

    /// Transition on a raw input byte. Returns [`DEAD_STATE`](crate::DEAD_STATE) if the scan
    /// dies here. Calling this with `state == DEAD_STATE` is a logic error.
    #[inline]
    pub fn next_state(&self, state: StateId, byte: u8) -> StateId {
        let class = self.byte_to_class[byte as usize] as usize;
        self.next[state as usize * self.num_classes + class]
    }

    /// Accept category of a state, or `None` for non-accepting states.
    #[inline]
    pub fn category(&self, state: StateId) -> Option<Category> {
        match self.accept[state as usize] {
            NO_CATEGORY => None,
            category => Some(category),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string produced by [`ScanTable::to_json`].
    pub fn from_json(json: &str) -> Result<ScanTable, serde_json::Error> {
        serde_json::from_str(json)
    }
}
