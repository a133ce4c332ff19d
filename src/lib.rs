//! # minilex — a scanner generator built on minimized automata
//!
//! minilex compiles a list of minimal regular expressions (literals, grouping,
//! concatenation, alternation, `*`, `+`) into a deterministic, minimized,
//! table-driven scanner that performs longest-match (maximal munch)
//! tokenization. Rule order is significant: when two rules match the same
//! longest prefix, the first-listed rule wins.
//!
//! ## Pipeline
//!
//! ```text
//! patterns ──parse──▶ Ast ──thompson──▶ Nfa ──subset──▶ Dfa ──hopcroft──▶ Dfa
//!                                                                        │
//!                                              ScanTable ◀───flatten─────┘
//!                                                  │
//!                        Scanner (runtime)  /  codegen (emitted Rust source)
//! ```
//!
//! Each stage is a pure function of the previous stage's output and is
//! independently testable; see [`pipeline::compile`] for the batch entry
//! point and [`scanner::Scanner`] for the runtime loop.
//!
//! ## Example
//!
//! ```
//! use minilex::pipeline::compile;
//! use minilex::scanner::{Scan, Scanner};
//!
//! let compiled = compile(&["a", "a*"]).unwrap();
//! let mut scanner = Scanner::new(&compiled.table, "aaa");
//! match scanner.next_token() {
//!     Scan::Token(tok) => {
//!         // longest match beats rule order: "a*" consumes all three bytes
//!         assert_eq!(tok.category, 1);
//!         assert_eq!(tok.lexeme, "aaa");
//!     }
//!     other => panic!("expected a token, got {:?}", other),
//! }
//! assert!(matches!(scanner.next_token(), Scan::EndOfInput));
//! ```

pub mod automata;
pub mod pipeline;
pub mod scanner;

#[cfg(test)]
mod tests;

/// Identifier for an automaton state.
pub type StateId = u32;

/// Identifier for an equivalence class of input bytes.
pub type ClassId = u8;

/// Identifier of the rule (input pattern) a match belongs to. Equals the
/// pattern's 0-based position in the input list; lower ids win ties.
pub type Category = u32;

/// Sentinel for a non-existent / dead state.
pub const DEAD_STATE: StateId = u32::MAX;

/// Sentinel category for non-accepting states.
pub const NO_CATEGORY: Category = u32::MAX;
