//! Regular expression parsing: pattern text → [`Ast`].
//!
//! The grammar is deliberately minimal (lowest to highest precedence):
//!
//! ```text
//! <regex>  ::= <alt>
//! <alt>    ::= <concat> | <concat> '|' <alt>
//! <concat> ::= <postfix> | <postfix> <concat>
//! <postfix>::= <atom> | <postfix> '*' | <postfix> '+'
//! <atom>   ::= symbol | '(' <regex> ')'
//! ```
//!
//! Every byte that is not one of `* + | ( ) \` is a literal matching itself.
//! Backslash escapes let the metacharacters appear as literals and provide
//! `\0`, `\t`, `\n`, `\r` for control bytes.
//!
//! No character classes, anchors, or bounded repetition — patterns compile to
//! pure Thompson NFAs downstream.

/// Regex abstract syntax tree. A closed variant set, matched exhaustively by
/// the Thompson builder; the grammar is fixed and small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// A single literal byte.
    Literal(u8),
    /// Juxtaposition: left then right.
    Concat(Box<Ast>, Box<Ast>),
    /// Alternation: left or right.
    Union(Box<Ast>, Box<Ast>),
    /// Kleene star: zero or more repetitions.
    Star(Box<Ast>),
    /// Positive closure: one or more repetitions.
    Plus(Box<Ast>),
}

/// Error from parsing a single regex pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset into the pattern where the error was detected.
    pub position: usize,
    /// Human-readable description of the error.
    pub message: String,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error at byte {}: {}", self.position, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Parse one regex pattern into an [`Ast`].
///
/// Pure function of the input text; no shared state across calls.
///
/// # Errors
///
/// Returns [`SyntaxError`] with the offending byte offset on: unmatched
/// parentheses, a quantifier or alternation with a missing operand, an empty
/// alternative branch, an empty pattern, a trailing backslash, or an unknown
/// escape.
pub fn parse_pattern(pattern: &str) -> Result<Ast, SyntaxError> {
    let mut parser = Parser { input: pattern.as_bytes(), pos: 0, current: Tok::Eof };
    parser.bump()?;
    let ast = parser.parse_alt()?;
    match parser.current {
        Tok::Eof => Ok(ast),
        Tok::RParen => Err(parser.error_at(parser.token_start(), "unmatched ')'")),
        _ => Err(parser.error_at(parser.token_start(), "junk after regex")),
    }
}

/// One token of the regex surface syntax. Escape resolution happens during
/// tokenization, so the parser only ever sees resolved `Symbol` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tok {
    Symbol(u8),
    Star,
    Plus,
    Pipe,
    LParen,
    RParen,
    Eof,
}

struct Parser<'a> {
    input: &'a [u8],
    /// Byte offset just past the current token.
    pos: usize,
    current: Tok,
}

impl<'a> Parser<'a> {
    fn error_at(&self, position: usize, message: &str) -> SyntaxError {
        SyntaxError { position, message: message.to_string() }
    }

    /// Offset of the first byte of the current token.
    fn token_start(&self) -> usize {
        match self.current {
            Tok::Eof => self.pos,
            // Symbols produced by an escape occupy two bytes; for error
            // reporting the single-byte approximation is good enough since
            // escapes themselves never trigger parse errors.
            _ => self.pos.saturating_sub(1),
        }
    }

    /// Advance to the next token, resolving escapes.
    fn bump(&mut self) -> Result<(), SyntaxError> {
        if self.pos >= self.input.len() {
            self.current = Tok::Eof;
            return Ok(());
        }
        let byte = self.input[self.pos];
        self.pos += 1;
        self.current = match byte {
            b'*' => Tok::Star,
            b'+' => Tok::Plus,
            b'|' => Tok::Pipe,
            b'(' => Tok::LParen,
            b')' => Tok::RParen,
            b'\\' => {
                if self.pos >= self.input.len() {
                    return Err(self.error_at(self.pos - 1, "trailing backslash"));
                }
                let escaped = self.input[self.pos];
                self.pos += 1;
                let resolved = match escaped {
                    b'0' => 0x00,
                    b't' => b'\t',
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b if b.is_ascii_alphanumeric() => {
                        return Err(self.error_at(
                            self.pos - 2,
                            &format!("invalid escape '\\{}'", b as char),
                        ));
                    }
                    b => b,
                };
                Tok::Symbol(resolved)
            }
            b => Tok::Symbol(b),
        };
        Ok(())
    }

    /// `<alt> ::= <concat> | <concat> '|' <alt>`
    fn parse_alt(&mut self) -> Result<Ast, SyntaxError> {
        let lhs = self.parse_concat()?;
        if self.current == Tok::Pipe {
            self.bump()?;
            let rhs = self.parse_alt()?;
            Ok(Ast::Union(Box::new(lhs), Box::new(rhs)))
        } else {
            Ok(lhs)
        }
    }

    /// `<concat> ::= <postfix> | <postfix> <concat>`
    fn parse_concat(&mut self) -> Result<Ast, SyntaxError> {
        let lhs = self.parse_postfix()?;
        match self.current {
            Tok::Symbol(_) | Tok::LParen => {
                let rhs = self.parse_concat()?;
                Ok(Ast::Concat(Box::new(lhs), Box::new(rhs)))
            }
            _ => Ok(lhs),
        }
    }

    /// `<postfix> ::= <atom> | <postfix> '*' | <postfix> '+'`
    fn parse_postfix(&mut self) -> Result<Ast, SyntaxError> {
        let mut ast = self.parse_atom()?;
        loop {
            match self.current {
                Tok::Star => {
                    ast = Ast::Star(Box::new(ast));
                    self.bump()?;
                }
                Tok::Plus => {
                    ast = Ast::Plus(Box::new(ast));
                    self.bump()?;
                }
                _ => return Ok(ast),
            }
        }
    }

    /// `<atom> ::= symbol | '(' <regex> ')'`
    fn parse_atom(&mut self) -> Result<Ast, SyntaxError> {
        match self.current {
            Tok::Symbol(byte) => {
                self.bump()?;
                Ok(Ast::Literal(byte))
            }
            Tok::LParen => {
                let open_pos = self.token_start();
                self.bump()?;
                let ast = self.parse_alt()?;
                if self.current != Tok::RParen {
                    return Err(self.error_at(open_pos, "unmatched '('"));
                }
                self.bump()?;
                Ok(ast)
            }
            Tok::Star | Tok::Plus => Err(self.error_at(
                self.token_start(),
                "quantifier without preceding operand",
            )),
            Tok::Pipe | Tok::RParen | Tok::Eof => {
                Err(self.error_at(self.token_start(), "expected regex term"))
            }
        }
    }
}
