//! Property tests: the compiled table-driven scanner must agree with a
//! direct NFA simulation (the executable definition of the rule semantics)
//! on arbitrary rule sets and inputs, and minimization must be invisible.

use proptest::prelude::*;

use crate::automata::regex::{parse_pattern, Ast};
use crate::automata::table::ScanTable;
use crate::automata::{epsilon_closure, Nfa};
use crate::pipeline::compile_with_artifacts;
use crate::scanner::{Scan, Scanner};
use crate::{Category, StateId};

/// Render an AST back to pattern text, fully parenthesized. Inverse of
/// `parse_pattern` up to redundant grouping.
fn render(ast: &Ast) -> String {
    match ast {
        Ast::Literal(b) => match b {
            b'*' | b'+' | b'|' | b'(' | b')' | b'\\' => format!("\\{}", *b as char),
            b => (*b as char).to_string(),
        },
        Ast::Concat(l, r) => format!("({}{})", render(l), render(r)),
        Ast::Union(l, r) => format!("({}|{})", render(l), render(r)),
        Ast::Star(inner) => format!("({})*", render(inner)),
        Ast::Plus(inner) => format!("({})+", render(inner)),
    }
}

/// Oracle outcome, position-based rather than lexeme-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OracleScan {
    Token { category: Category, end: usize },
    EndOfInput,
    Error { position: usize },
}

/// Reference scan step: maximal munch by direct NFA-set simulation, minimum
/// category among accepting states at the last accepting position.
fn oracle_next(nfa: &Nfa, input: &[u8], start: usize) -> OracleScan {
    if start >= input.len() {
        return OracleScan::EndOfInput;
    }

    let mut current: Vec<StateId> = epsilon_closure(nfa, &[nfa.start]);
    let mut pos = start;
    let mut last_accept: Option<(Category, usize)> = None;

    let accept_of = |set: &[StateId]| -> Option<Category> {
        set.iter().filter_map(|&s| nfa.states[s as usize].accept).min()
    };

    if let Some(category) = accept_of(&current) {
        last_accept = Some((category, pos));
    }

    while pos < input.len() {
        let byte = input[pos];
        let mut next: Vec<StateId> = Vec::new();
        for &state in &current {
            for &(b, target) in &nfa.states[state as usize].transitions {
                if b == byte {
                    next.push(target);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        current = epsilon_closure(nfa, &next);
        pos += 1;
        if let Some(category) = accept_of(&current) {
            last_accept = Some((category, pos));
        }
    }

    match last_accept {
        Some((category, end)) => OracleScan::Token { category, end },
        None => OracleScan::Error { position: start },
    }
}

/// Walk both scanners over the whole input, asserting agreement step by step.
fn assert_agrees_with_oracle(patterns: &[&str], input: &str) {
    let artifacts = compile_with_artifacts(patterns).expect("patterns must compile");
    let mut scanner = Scanner::new(&artifacts.table, input);

    loop {
        let pos = scanner.position();
        let got = scanner.next_token();
        let want = oracle_next(&artifacts.nfa, input.as_bytes(), pos);

        match (got, want) {
            (Scan::Token(t), OracleScan::Token { category, end }) => {
                assert_eq!(t.category, category, "category at {pos} on {input:?}");
                assert_eq!(t.lexeme, &input[pos..end], "lexeme at {pos} on {input:?}");
                if t.lexeme.is_empty() {
                    return; // non-advancing match; stop before spinning
                }
            }
            (Scan::EndOfInput, OracleScan::EndOfInput) => return,
            (Scan::Error { position: a }, OracleScan::Error { position: b }) => {
                assert_eq!(a, b, "error position on {input:?}");
                return;
            }
            (got, want) => panic!("scanner {got:?} vs oracle {want:?} at {pos} on {input:?}"),
        }
    }
}

fn ast_strategy() -> impl Strategy<Value = Ast> {
    let leaf = prop_oneof![Just(b'a'), Just(b'b'), Just(b'c')].prop_map(Ast::Literal);
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Ast::Concat(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Ast::Union(Box::new(l), Box::new(r))),
            inner.clone().prop_map(|a| Ast::Star(Box::new(a))),
            inner.prop_map(|a| Ast::Plus(Box::new(a))),
        ]
    })
}

fn input_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('b'), Just('c'), Just('d')], 0..12)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(256))]

    #[test]
    fn prop_render_parse_round_trip(ast in ast_strategy()) {
        let rendered = render(&ast);
        let reparsed = parse_pattern(&rendered).expect("rendered pattern must parse");
        prop_assert_eq!(reparsed, ast);
    }

    #[test]
    fn prop_scanner_agrees_with_nfa_oracle(
        asts in proptest::collection::vec(ast_strategy(), 1..4),
        input in input_strategy(),
    ) {
        let patterns: Vec<String> = asts.iter().map(render).collect();
        let refs: Vec<&str> = patterns.iter().map(String::as_str).collect();
        assert_agrees_with_oracle(&refs, &input);
    }

    #[test]
    fn prop_minimization_is_invisible(
        asts in proptest::collection::vec(ast_strategy(), 1..4),
        input in input_strategy(),
    ) {
        let patterns: Vec<String> = asts.iter().map(render).collect();
        let refs: Vec<&str> = patterns.iter().map(String::as_str).collect();
        let artifacts = compile_with_artifacts(&refs).expect("patterns must compile");

        let unminimized = ScanTable::from_dfa(&artifacts.dfa, &artifacts.partition);
        let mut a = Scanner::new(&unminimized, &input);
        let mut b = Scanner::new(&artifacts.table, &input);
        loop {
            let (x, y) = (a.next_token(), b.next_token());
            prop_assert_eq!(x, y);
            match x {
                Scan::Token(t) if !t.lexeme.is_empty() => {}
                _ => break,
            }
        }
    }

    #[test]
    fn prop_table_json_round_trip(
        asts in proptest::collection::vec(ast_strategy(), 1..4),
    ) {
        let patterns: Vec<String> = asts.iter().map(render).collect();
        let refs: Vec<&str> = patterns.iter().map(String::as_str).collect();
        let artifacts = compile_with_artifacts(&refs).expect("patterns must compile");
        let json = artifacts.table.to_json().expect("serialize");
        prop_assert_eq!(ScanTable::from_json(&json).expect("deserialize"), artifacts.table);
    }
}
