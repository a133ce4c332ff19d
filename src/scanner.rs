//! Table-driven scan runtime: longest-match tokenization over a [`ScanTable`].
//!
//! The scanner holds a cursor into the input and hands out one token per
//! [`Scanner::next_token`] call. Each call walks the DFA from the start state,
//! remembering the most recent accepting position, until the walk hits the
//! dead state or the end of the input; it then rewinds to that last accepting
//! position (maximal munch). Ties between rules matching the same longest
//! prefix were already resolved at compile time, so the accept category in
//! the table is final.
//!
//! Three outcomes are kept distinct: a token, the end of the input, and a
//! lexical error. An error does not advance the cursor, so the caller can
//! report the position and decide how to recover.

use crate::automata::table::ScanTable;
use crate::{Category, DEAD_STATE};

/// One matched token: the winning rule's category and the matched slice of
/// the input. Borrows from the input; no copying during scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// 0-based index of the winning rule.
    pub category: Category,
    /// The matched input slice.
    pub lexeme: &'a str,
}

/// Outcome of one [`Scanner::next_token`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan<'a> {
    /// A token was matched; the cursor now sits just past its lexeme.
    Token(Token<'a>),
    /// The cursor was already at the end of the input.
    EndOfInput,
    /// No rule matches any prefix at the cursor. The cursor does not move.
    Error {
        /// Byte offset of the cursor when the error was detected.
        position: usize,
    },
}

/// Lexical error from [`Scanner::tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    /// Byte offset where no rule matched.
    pub position: usize,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no rule matches input at byte {}", self.position)
    }
}

impl std::error::Error for ScanError {}

/// Cursor-carrying scanner over one input string.
#[derive(Debug)]
pub struct Scanner<'a> {
    table: &'a ScanTable,
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of `input`.
    pub fn new(table: &'a ScanTable, input: &'a str) -> Scanner<'a> {
        Scanner { table, input, pos: 0 }
    }

    /// Current cursor position (byte offset into the input).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Scan the next token at the cursor.
    ///
    /// A rule that accepts the empty string yields an empty-lexeme token
    /// rather than `EndOfInput` while input remains; `EndOfInput` is reported
    /// only when the cursor has consumed the whole input. Callers that loop
    /// must therefore treat an empty lexeme as a non-advancing match.
    ///
    /// Patterns are byte-level, so an accepting position can fall inside a
    /// multi-byte character of the input; that match cannot be returned as a
    /// `&str` lexeme and is reported as `Error` instead.
    pub fn next_token(&mut self) -> Scan<'a> {
        let bytes = self.input.as_bytes();
        if self.pos >= bytes.len() {
            return Scan::EndOfInput;
        }

        let start = self.pos;
        let mut state = self.table.start;
        let mut pos = start;
        let mut last_accept: Option<(Category, usize)> = None;

        if let Some(category) = self.table.category(state) {
            last_accept = Some((category, pos));
        }

        while pos < bytes.len() {
            let next = self.table.next_state(state, bytes[pos]);
            if next == DEAD_STATE {
                break;
            }
            state = next;
            pos += 1;
            if let Some(category) = self.table.category(state) {
                last_accept = Some((category, pos));
            }
        }

        match last_accept {
            // The DFA walks raw bytes, so an accept can land inside a
            // multi-byte character; such a lexeme is not a valid str slice
            // and is reported as a lexical error, cursor unmoved.
            Some((category, end)) => match self.input.get(start..end) {
                Some(lexeme) => {
                    self.pos = end;
                    Scan::Token(Token { category, lexeme })
                }
                None => Scan::Error { position: start },
            },
            None => Scan::Error { position: start },
        }
    }

    /// Scan the whole input into a token list, stopping at the first error.
    ///
    /// Empty-lexeme matches are skipped instead of looping forever: the
    /// cursor advances past them only by subsequent non-empty matches, so a
    /// rule set whose only match at some position is empty is reported as an
    /// error there.
    pub fn tokenize(&mut self) -> Result<Vec<Token<'a>>, ScanError> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Scan::Token(token) => {
                    if token.lexeme.is_empty() {
                        return Err(ScanError { position: self.pos });
                    }
                    tokens.push(token);
                }
                Scan::EndOfInput => return Ok(tokens),
                Scan::Error { position } => return Err(ScanError { position }),
            }
        }
    }
}
