//! ScanTable → Rust scanner source emission.
//!
//! Emits a self-contained, dependency-free Rust module that reproduces the
//! table-driven scanner for one compiled rule set: the class map, transition
//! and accept arrays as statics, plus a `next_token` function with the same
//! longest-match behavior and the same three-way outcome as the in-process
//! runtime. The emitted module has no dependency on this crate.
//!
//! Generation is string-based with a single `TokenStream::parse()` at the
//! end rather than incremental `quote!` assembly, which avoids per-element
//! proc_macro2 allocations across the O(states × classes) table literals.

use std::fmt::Write;

use proc_macro2::TokenStream;

use super::table::ScanTable;

/// Generate the scanner module as a TokenStream.
///
/// Parsing the emitted string validates that it is syntactically well-formed
/// Rust; semantic agreement with the table is by construction (the statics
/// are verbatim copies of the table arrays).
pub fn generate_scanner_code(table: &ScanTable) -> TokenStream {
    let buf = generate_scanner_string(table);
    buf.parse::<TokenStream>().expect("generated scanner code must be valid Rust")
}

/// Generate the scanner module as a `String`.
pub fn generate_scanner_string(table: &ScanTable) -> String {
    // Table literals dominate the output size.
    let estimated_size = 4096 + table.next.len() * 12;
    let mut buf = String::with_capacity(estimated_size);

    write_outcome_enum(&mut buf);
    write_class_table(&mut buf, table);
    write_transition_table(&mut buf, table);
    write_accept_table(&mut buf, table);

    write!(
        buf,
        "const NUM_CLASSES: usize = {}; \
         const START: u32 = {}; \
         const DEAD: u32 = u32::MAX; \
         const NO_CATEGORY: u32 = u32::MAX;",
        table.num_classes, table.start
    )
    .unwrap();

    write_next_token_fn(&mut buf);

    buf
}

/// Write the three-way scan outcome enum to a string buffer.
fn write_outcome_enum(buf: &mut String) {
    buf.push_str(
        "/// Outcome of one scan step.\n\
         #[derive(Debug, Clone, Copy, PartialEq, Eq)] \
         pub enum Scanned<'a> { \
             /// A token: rule category and the matched lexeme.\n\
             Token { category: u32, lexeme: &'a str }, \
             /// The cursor was already at the end of the input.\n\
             EndOfInput, \
             /// No rule matches any prefix at the cursor.\n\
             Error { position: usize }, \
         }\n",
    );
}

/// Write the byte → equivalence class table as a static array literal.
fn write_class_table(buf: &mut String, table: &ScanTable) {
    buf.push_str("static CHAR_CLASS: [u8; 256] = [");
    for (i, &class) in table.byte_to_class.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        write!(buf, "{}", class).unwrap();
    }
    buf.push_str("];");
}

/// Write the flat transition table as a static array literal.
fn write_transition_table(buf: &mut String, table: &ScanTable) {
    write!(buf, "static TRANSITIONS: [u32; {}] = [", table.next.len()).unwrap();
    for (i, &target) in table.next.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        write!(buf, "{}", target).unwrap();
    }
    buf.push_str("];");
}

/// Write the per-state accept category table as a static array literal.
fn write_accept_table(buf: &mut String, table: &ScanTable) {
    write!(buf, "static ACCEPT: [u32; {}] = [", table.accept.len()).unwrap();
    for (i, &category) in table.accept.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        write!(buf, "{}", category).unwrap();
    }
    buf.push_str("];");
}

/// Write the `next_token` function: longest match from `start`, remembering
/// the last accepting position and rewinding to it when the walk dies.
fn write_next_token_fn(buf: &mut String) {
    buf.push_str(
        "/// Scan one token starting at byte offset `start`.\n\
         ///\n\
         /// Returns the longest match as a `Token`, `EndOfInput` when `start`\n\
         /// is at the end of the input, or `Error` when no rule matches any\n\
         /// prefix or the byte-level match ends inside a multi-byte character\n\
         /// (in either case the caller's cursor should not advance).\n\
         pub fn next_token(input: &str, start: usize) -> Scanned<'_> { \
         let bytes = input.as_bytes(); \
         if start >= bytes.len() { return Scanned::EndOfInput; } \
         let mut state: u32 = START; \
         let mut pos = start; \
         let mut last_accept: Option<(u32, usize)> = None; \
         if ACCEPT[state as usize] != NO_CATEGORY { last_accept = Some((state, pos)); } \
         while pos < bytes.len() { \
         let class = CHAR_CLASS[bytes[pos] as usize] as usize; \
         let next = TRANSITIONS[state as usize * NUM_CLASSES + class]; \
         if next == DEAD { break; } \
         state = next; \
         pos += 1; \
         if ACCEPT[state as usize] != NO_CATEGORY { last_accept = Some((state, pos)); } \
         } \
         match last_accept { \
         Some((accept_state, end)) => match input.get(start..end) { \
         Some(lexeme) => Scanned::Token { \
         category: ACCEPT[accept_state as usize], \
         lexeme, \
         }, \
         None => Scanned::Error { position: start }, \
         }, \
         None => Scanned::Error { position: start }, \
         } }",
    );
}
