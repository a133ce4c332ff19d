//! Automata infrastructure for scanner generation.
//!
//! Provides the NFA/DFA arena types and the compilation stages:
//! `patterns -> Ast -> NFA -> DFA -> Minimize -> ScanTable -> Codegen`
//!
//! Graphs are cyclic (loops for `*`/`+`), so states live in flat arenas
//! addressed by [`StateId`] and edges are id-to-id pairs; nothing holds a
//! reference into an automaton.

pub mod codegen;
pub mod dot;
pub mod minimize;
pub mod partition;
pub mod regex;
pub mod subset;
pub mod table;
pub mod thompson;

use crate::{Category, ClassId, StateId, DEAD_STATE};

/// NFA state with labeled byte transitions and epsilon transitions.
#[derive(Debug, Clone)]
pub struct NfaState {
    /// Labeled transitions: (byte, target state).
    pub transitions: Vec<(u8, StateId)>,
    /// Epsilon transitions: target states reachable without consuming input.
    pub epsilon: Vec<StateId>,
    /// If this is an accepting state, the category (rule index) it reports.
    pub accept: Option<Category>,
}

impl NfaState {
    /// Create a new non-accepting NFA state with no transitions.
    pub fn new() -> Self {
        NfaState { transitions: Vec::new(), epsilon: Vec::new(), accept: None }
    }

    /// Create a new accepting NFA state for the given category.
    pub fn accepting(category: Category) -> Self {
        NfaState { transitions: Vec::new(), epsilon: Vec::new(), accept: Some(category) }
    }
}

impl Default for NfaState {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete NFA (arena of states with a designated start state).
#[derive(Debug, Clone)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub start: StateId,
}

impl Nfa {
    /// Create a new NFA with a single non-accepting start state.
    pub fn new() -> Self {
        Nfa { states: vec![NfaState::new()], start: 0 }
    }

    /// Add a new state and return its id.
    pub fn add_state(&mut self, state: NfaState) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(state);
        id
    }

    /// Add an epsilon transition from `from` to `to`.
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from as usize].epsilon.push(to);
    }

    /// Add a labeled transition from `from` to `to` on `byte`.
    pub fn add_transition(&mut self, from: StateId, to: StateId, byte: u8) {
        self.states[from as usize].transitions.push((byte, to));
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the epsilon closure of a set of NFA states: all states reachable
/// via zero or more epsilon transitions. The result is sorted and deduplicated
/// so it can serve as a canonical subset identity during determinization.
pub fn epsilon_closure(nfa: &Nfa, states: &[StateId]) -> Vec<StateId> {
    let mut closure: Vec<StateId> = states.to_vec();
    let mut stack: Vec<StateId> = states.to_vec();
    let mut visited = vec![false; nfa.states.len()];

    for &s in states {
        visited[s as usize] = true;
    }

    while let Some(state) = stack.pop() {
        for &target in &nfa.states[state as usize].epsilon {
            if !visited[target as usize] {
                visited[target as usize] = true;
                closure.push(target);
                stack.push(target);
            }
        }
    }

    closure.sort_unstable();
    closure
}

/// DFA state with deterministic transitions.
///
/// Transitions are stored as a dense array indexed by equivalence class id:
/// `transitions[class_id]` is the target state, or [`DEAD_STATE`] if no
/// transition exists for that class.
#[derive(Debug, Clone)]
pub struct DfaState {
    /// Dense transition row, length `num_classes` (stored in parent [`Dfa`]).
    pub transitions: Vec<StateId>,
    /// If this is an accepting state, the category it reports.
    pub accept: Option<Category>,
}

impl DfaState {
    /// Create a new non-accepting DFA state with `num_classes` dead transitions.
    pub fn with_classes(num_classes: usize) -> Self {
        DfaState { transitions: vec![DEAD_STATE; num_classes], accept: None }
    }
}

/// A complete DFA (arena of states with a designated start state).
#[derive(Debug, Clone)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub start: StateId,
    /// Alphabet size after equivalence-class partitioning.
    pub num_classes: usize,
}

impl Dfa {
    /// Create a new DFA with a single non-accepting start state.
    pub fn new(num_classes: usize) -> Self {
        Dfa { states: vec![DfaState::with_classes(num_classes)], start: 0, num_classes }
    }

    /// Add a new state and return its id.
    pub fn add_state(&mut self, state: DfaState) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(state);
        id
    }

    /// O(1) transition lookup: target state or [`DEAD_STATE`].
    #[inline]
    pub fn transition(&self, state: StateId, class: ClassId) -> StateId {
        self.states[state as usize].transitions[class as usize]
    }

    /// Set a transition: `state --class--> target`.
    #[inline]
    pub fn set_transition(&mut self, state: StateId, class: ClassId, target: StateId) {
        self.states[state as usize].transitions[class as usize] = target;
    }
}

/// An NFA fragment (sub-automaton) with a designated start and accept state,
/// built up incrementally during Thompson's construction.
#[derive(Debug, Clone, Copy)]
pub struct NfaFragment {
    pub start: StateId,
    pub accept: StateId,
}
