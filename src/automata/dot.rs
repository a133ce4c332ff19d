//! Graphviz (DOT) rendering of automata, for debugging rule sets.
//!
//! Both renderers follow the same conventions: `rankdir=LR`, a synthetic
//! invisible `__start` node pointing at the real start state, `doublecircle`
//! shapes for accepting states with their category in the label, and edge
//! labels showing the byte (printable ASCII as-is, everything else as hex).
//! Epsilon edges are labeled `ε`; DFA edges collapse all bytes of an
//! equivalence class into one comma-separated label.

use std::fmt::Write;

use super::partition::AlphabetPartition;
use super::{Dfa, Nfa};
use crate::DEAD_STATE;

/// Render an NFA as a DOT digraph.
pub fn nfa_to_dot(nfa: &Nfa) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph nfa {{");
    let _ = writeln!(out, "    rankdir=LR;");
    let _ = writeln!(out, "    __start [shape=point];");
    let _ = writeln!(out, "    __start -> s{};", nfa.start);

    for (id, state) in nfa.states.iter().enumerate() {
        match state.accept {
            Some(category) => {
                let _ = writeln!(
                    out,
                    "    s{id} [shape=doublecircle, label=\"{id}\\ncat {category}\"];"
                );
            }
            None => {
                let _ = writeln!(out, "    s{id} [shape=circle, label=\"{id}\"];");
            }
        }
    }

    for (id, state) in nfa.states.iter().enumerate() {
        for &target in &state.epsilon {
            let _ = writeln!(out, "    s{id} -> s{target} [label=\"ε\"];");
        }
        for &(byte, target) in &state.transitions {
            let _ = writeln!(
                out,
                "    s{id} -> s{target} [label=\"{}\"];",
                byte_label(byte)
            );
        }
    }

    let _ = writeln!(out, "}}");
    out
}

/// Render a DFA as a DOT digraph. The partition recovers byte labels for the
/// class-indexed transition rows; dead transitions are omitted.
pub fn dfa_to_dot(dfa: &Dfa, partition: &AlphabetPartition) -> String {
    // One label per class, listing the bytes it contains (elided past a few).
    let mut class_labels: Vec<String> = vec![String::new(); dfa.num_classes];
    let mut class_sizes = vec![0usize; dfa.num_classes];
    for byte in 0u8..=255 {
        let class = partition.classify(byte) as usize;
        class_sizes[class] += 1;
        if class_sizes[class] <= 4 {
            if !class_labels[class].is_empty() {
                class_labels[class].push(',');
            }
            class_labels[class].push_str(&byte_label(byte));
        }
    }
    for (label, &size) in class_labels.iter_mut().zip(&class_sizes) {
        if size > 4 {
            let _ = write!(label, ",… ({size} bytes)");
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "digraph dfa {{");
    let _ = writeln!(out, "    rankdir=LR;");
    let _ = writeln!(out, "    __start [shape=point];");
    let _ = writeln!(out, "    __start -> s{};", dfa.start);

    for (id, state) in dfa.states.iter().enumerate() {
        match state.accept {
            Some(category) => {
                let _ = writeln!(
                    out,
                    "    s{id} [shape=doublecircle, label=\"{id}\\ncat {category}\"];"
                );
            }
            None => {
                let _ = writeln!(out, "    s{id} [shape=circle, label=\"{id}\"];");
            }
        }
    }

    for (id, state) in dfa.states.iter().enumerate() {
        for (class, &target) in state.transitions.iter().enumerate() {
            if target != DEAD_STATE {
                let _ = writeln!(
                    out,
                    "    s{id} -> s{target} [label=\"{}\"];",
                    class_labels[class]
                );
            }
        }
    }

    let _ = writeln!(out, "}}");
    out
}

/// Printable label for a byte: the character itself for graphic ASCII (with
/// DOT string escaping), `0xNN` otherwise.
fn byte_label(byte: u8) -> String {
    match byte {
        b'"' => "\\\"".to_string(),
        b'\\' => "\\\\".to_string(),
        0x21..=0x7e => (byte as char).to_string(),
        b' ' => "' '".to_string(),
        _ => format!("0x{byte:02x}"),
    }
}
