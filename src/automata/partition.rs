//! Alphabet equivalence-class partitioning.
//!
//! Partitions the 256 byte values into equivalence classes — bytes that
//! trigger identical transitions in every NFA state. Rule sets touch only a
//! handful of distinct bytes, so this collapses the DFA transition rows from
//! 256 columns to a few, with one catch-all class for bytes no rule mentions.
//! The byte-level transition function is recovered by composing the
//! byte→class map with the class-indexed rows.

use super::Nfa;
use crate::ClassId;

/// Result of alphabet partitioning: a mapping from byte → equivalence class.
#[derive(Debug, Clone)]
pub struct AlphabetPartition {
    /// Maps each byte value to its equivalence class id.
    pub byte_to_class: [ClassId; 256],
    /// Number of distinct equivalence classes.
    pub num_classes: usize,
    /// Representative byte for each class (used to probe NFA transitions).
    pub class_representatives: Vec<u8>,
}

impl AlphabetPartition {
    /// Look up the equivalence class for a byte.
    #[inline]
    pub fn classify(&self, byte: u8) -> ClassId {
        self.byte_to_class[byte as usize]
    }
}

/// Compute equivalence classes from an NFA.
///
/// Two bytes are equivalent iff they lead to the same target-state sets from
/// every NFA state. Each byte gets a signature (the sorted per-state target
/// lists); bytes with identical signatures share a class.
pub fn compute_equivalence_classes(nfa: &Nfa) -> AlphabetPartition {
    type Signature = Vec<(u32, Vec<u32>)>;

    let mut targets_buf: Vec<u32> = Vec::new();
    let mut byte_signatures: Vec<Signature> = Vec::with_capacity(256);

    for byte in 0u8..=255 {
        let mut sig: Signature = Vec::new();
        for (state_idx, state) in nfa.states.iter().enumerate() {
            targets_buf.clear();
            for &(b, target) in &state.transitions {
                if b == byte {
                    targets_buf.push(target);
                }
            }
            if !targets_buf.is_empty() {
                targets_buf.sort_unstable();
                targets_buf.dedup();
                sig.push((state_idx as u32, targets_buf.clone()));
            }
        }
        byte_signatures.push(sig);
    }

    // Group bytes by identical signatures. Linear scan: rule sets yield a
    // handful of classes, so a map would cost more than it saves.
    let mut byte_to_class = [0u8; 256];
    let mut class_representatives: Vec<u8> = Vec::new();
    let mut num_classes: usize = 0;

    let mut sig_to_class: Vec<(Signature, ClassId)> = Vec::new();

    for byte in 0u8..=255 {
        let sig = &byte_signatures[byte as usize];
        let class = if let Some((_, existing)) = sig_to_class.iter().find(|(s, _)| s == sig) {
            *existing
        } else {
            let new_class = num_classes as ClassId;
            num_classes += 1;
            sig_to_class.push((sig.clone(), new_class));
            class_representatives.push(byte);
            new_class
        };
        byte_to_class[byte as usize] = class;
    }

    AlphabetPartition { byte_to_class, num_classes, class_representatives }
}
