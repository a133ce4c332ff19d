//! Thompson's construction: [`Ast`] list → one combined NFA.
//!
//! Each rule's AST is translated bottom-up into a fragment (a start/accept
//! state pair); the fragment's accept state is labeled with the rule's
//! 0-based category. A single overall start state gets an epsilon edge to
//! every fragment start, so the combined NFA recognizes the union of all
//! rule languages while keeping per-rule attribution.
//!
//! Wiring per node kind:
//!
//! ```text
//! Literal(c):  s --c--> a
//! Concat(A,B): A.accept --ε--> B.start
//! Union(A,B):  s --ε--> {A.start, B.start};  {A.accept, B.accept} --ε--> a
//! Star(A):     s --ε--> {A.start, a};  A.accept --ε--> {A.start, a}
//! Plus(A):     s --ε--> A.start;       A.accept --ε--> {A.start, a}
//! ```
//!
//! Star and Plus differ only in the skip edge `s --ε--> a` (zero repetitions).

use super::{regex::Ast, Nfa, NfaFragment, NfaState};
use crate::Category;

/// Build a combined NFA from an ordered list of rule ASTs.
///
/// The list index of each AST becomes its category; accept states carry it.
/// Well-formed ASTs cannot fail to translate, so this returns the NFA
/// directly — a malformed tree would be an upstream defect, not a user error.
pub fn build_nfa(asts: &[Ast]) -> Nfa {
    let mut nfa = Nfa::new();
    let global_start = nfa.start;

    for (index, ast) in asts.iter().enumerate() {
        let frag = build_fragment(&mut nfa, ast);
        nfa.states[frag.accept as usize].accept = Some(index as Category);
        nfa.add_epsilon(global_start, frag.start);
    }

    nfa
}

/// Translate one AST into an NFA fragment, accumulating states and edges
/// into the shared arena.
fn build_fragment(nfa: &mut Nfa, ast: &Ast) -> NfaFragment {
    match ast {
        Ast::Literal(byte) => {
            let start = nfa.add_state(NfaState::new());
            let accept = nfa.add_state(NfaState::new());
            nfa.add_transition(start, accept, *byte);
            NfaFragment { start, accept }
        }
        Ast::Concat(left, right) => {
            let a = build_fragment(nfa, left);
            let b = build_fragment(nfa, right);
            nfa.add_epsilon(a.accept, b.start);
            NfaFragment { start: a.start, accept: b.accept }
        }
        Ast::Union(left, right) => {
            let a = build_fragment(nfa, left);
            let b = build_fragment(nfa, right);
            let start = nfa.add_state(NfaState::new());
            let accept = nfa.add_state(NfaState::new());
            nfa.add_epsilon(start, a.start);
            nfa.add_epsilon(start, b.start);
            nfa.add_epsilon(a.accept, accept);
            nfa.add_epsilon(b.accept, accept);
            NfaFragment { start, accept }
        }
        Ast::Star(inner) => {
            let a = build_fragment(nfa, inner);
            let start = nfa.add_state(NfaState::new());
            let accept = nfa.add_state(NfaState::new());
            nfa.add_epsilon(start, a.start);
            nfa.add_epsilon(start, accept);
            nfa.add_epsilon(a.accept, a.start);
            nfa.add_epsilon(a.accept, accept);
            NfaFragment { start, accept }
        }
        Ast::Plus(inner) => {
            let a = build_fragment(nfa, inner);
            let start = nfa.add_state(NfaState::new());
            let accept = nfa.add_state(NfaState::new());
            nfa.add_epsilon(start, a.start);
            nfa.add_epsilon(a.accept, a.start);
            nfa.add_epsilon(a.accept, accept);
            NfaFragment { start, accept }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::epsilon_closure;
    use crate::automata::regex::parse_pattern;

    fn nfa_for(patterns: &[&str]) -> Nfa {
        let asts: Vec<Ast> =
            patterns.iter().map(|p| parse_pattern(p).expect("pattern must parse")).collect();
        build_nfa(&asts)
    }

    /// Simulate the NFA on a full input; returns the minimum category among
    /// accepting states reached, if any.
    fn nfa_accepts(nfa: &Nfa, input: &[u8]) -> Option<u32> {
        let mut current = epsilon_closure(nfa, &[nfa.start]);
        for &byte in input {
            let mut next: Vec<u32> = Vec::new();
            for &state in &current {
                for &(b, target) in &nfa.states[state as usize].transitions {
                    if b == byte {
                        next.push(target);
                    }
                }
            }
            if next.is_empty() {
                return None;
            }
            current = epsilon_closure(nfa, &next);
        }
        current.iter().filter_map(|&s| nfa.states[s as usize].accept).min()
    }

    #[test]
    fn test_literal_fragment() {
        let nfa = nfa_for(&["a"]);
        assert_eq!(nfa_accepts(&nfa, b"a"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"b"), None);
        assert_eq!(nfa_accepts(&nfa, b"aa"), None);
    }

    #[test]
    fn test_concat() {
        let nfa = nfa_for(&["ab"]);
        assert_eq!(nfa_accepts(&nfa, b"ab"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"a"), None);
        assert_eq!(nfa_accepts(&nfa, b"abb"), None);
    }

    #[test]
    fn test_union() {
        let nfa = nfa_for(&["a|b"]);
        assert_eq!(nfa_accepts(&nfa, b"a"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"b"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"c"), None);
    }

    #[test]
    fn test_star_accepts_empty() {
        let nfa = nfa_for(&["a*"]);
        assert_eq!(nfa_accepts(&nfa, b""), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"a"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"aaaa"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"ab"), None);
    }

    #[test]
    fn test_plus_requires_one() {
        let nfa = nfa_for(&["a+"]);
        assert_eq!(nfa_accepts(&nfa, b""), None);
        assert_eq!(nfa_accepts(&nfa, b"a"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"aaa"), Some(0));
    }

    #[test]
    fn test_grouped_star() {
        let nfa = nfa_for(&["(ab)*"]);
        assert_eq!(nfa_accepts(&nfa, b""), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"ab"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"abab"), Some(0));
        assert_eq!(nfa_accepts(&nfa, b"aba"), None);
    }

    #[test]
    fn test_categories_follow_rule_order() {
        let nfa = nfa_for(&["ab", "a*b*"]);
        // Both rules accept "ab"; the combined NFA must report the minimum.
        assert_eq!(nfa_accepts(&nfa, b"ab"), Some(0));
        // Only the second rule accepts "aab".
        assert_eq!(nfa_accepts(&nfa, b"aab"), Some(1));
    }

    #[test]
    fn test_start_has_one_epsilon_per_rule() {
        let nfa = nfa_for(&["a", "b", "c"]);
        assert_eq!(nfa.states[nfa.start as usize].epsilon.len(), 3);
    }

    #[test]
    fn test_each_rule_has_one_labeled_accept() {
        let nfa = nfa_for(&["ab|c", "x+"]);
        let mut labels: Vec<u32> =
            nfa.states.iter().filter_map(|s| s.accept).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1]);
    }
}
