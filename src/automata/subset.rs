//! Subset (powerset) construction: NFA → DFA.
//!
//! 1. The epsilon closure of the NFA start state becomes the initial DFA
//!    state and seeds a work queue.
//! 2. For each unprocessed DFA state and each alphabet class, the union of
//!    symbol-targets from the member NFA states is closed over epsilon and
//!    recorded (or reused) as a DFA state; deduplication is by exact
//!    NFA-state-set equality over sorted id vectors.
//! 3. A DFA state accepts iff its set contains an accepting NFA state; its
//!    category is the *minimum* category present, so the first-listed rule
//!    wins when several rules accept the same string.
//!
//! The transition function stays partial — absent entries are the implicit
//! dead state. Termination: reachable subsets are finite and the queue only
//! grows by genuinely new subsets.

use std::collections::HashMap;

use super::{epsilon_closure, partition::AlphabetPartition, Dfa, DfaState, Nfa};
use crate::{Category, ClassId, StateId, DEAD_STATE};

/// Convert an NFA to a DFA using subset construction with alphabet
/// partitioning. Transition rows are indexed by equivalence class id.
///
/// State ids are assigned in work-queue discovery order, which depends only
/// on the NFA and partition, so repeated runs produce identical DFAs.
pub fn subset_construction(nfa: &Nfa, partition: &AlphabetPartition) -> Dfa {
    let num_classes = partition.num_classes;
    let mut dfa = Dfa::new(num_classes);

    // Map from sorted set of NFA states → DFA state id.
    let mut state_map: HashMap<Vec<StateId>, StateId> = HashMap::new();
    // Work queue of DFA states still to process.
    let mut worklist: Vec<Vec<StateId>> = Vec::new();

    let start_set = epsilon_closure(nfa, &[nfa.start]);
    dfa.states[0].accept = resolve_accept(nfa, &start_set);
    state_map.insert(start_set.clone(), 0);
    worklist.push(start_set);

    while let Some(current_set) = worklist.pop() {
        let current_dfa_state = *state_map
            .get(&current_set)
            .expect("processed set must be registered in state_map");

        for class in 0..num_classes {
            let class_id = class as ClassId;
            let rep_byte = partition.class_representatives[class];

            // move(current_set, class): all NFA targets reachable on any byte
            // of this class — probing the representative suffices because
            // class members have identical transition signatures.
            let mut target_set: Vec<StateId> = Vec::new();
            for &nfa_state in &current_set {
                for &(byte, target) in &nfa.states[nfa_state as usize].transitions {
                    if byte == rep_byte {
                        target_set.push(target);
                    }
                }
            }

            if target_set.is_empty() {
                continue; // implicit dead state for this class
            }

            target_set.sort_unstable();
            target_set.dedup();
            let target_set = epsilon_closure(nfa, &target_set);

            let target_dfa_state = if let Some(&existing) = state_map.get(&target_set) {
                existing
            } else {
                let accept = resolve_accept(nfa, &target_set);
                let new_state = dfa.add_state(DfaState {
                    transitions: vec![DEAD_STATE; num_classes],
                    accept,
                });
                state_map.insert(target_set.clone(), new_state);
                worklist.push(target_set);
                new_state
            };

            dfa.set_transition(current_dfa_state, class_id, target_dfa_state);
        }
    }

    dfa
}

/// Resolve the accept category for a set of NFA states: the minimum category
/// among contained accepting states, so the first-listed rule wins ties.
fn resolve_accept(nfa: &Nfa, states: &[StateId]) -> Option<Category> {
    states.iter().filter_map(|&s| nfa.states[s as usize].accept).min()
}
