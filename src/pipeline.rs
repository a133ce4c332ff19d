//! Compilation pipeline: pattern list → [`ScanTable`].
//!
//! Runs the stages in sequence — parse, Thompson construction, alphabet
//! partitioning, subset construction, Hopcroft minimization, flattening —
//! and reports per-stage sizes via `log::debug!`. Each stage is a pure
//! function; the pipeline only sequences them and attributes errors to the
//! offending rule.

use log::debug;

use crate::automata::codegen::generate_scanner_string;
use crate::automata::minimize::minimize_dfa;
use crate::automata::partition::{compute_equivalence_classes, AlphabetPartition};
use crate::automata::regex::{parse_pattern, Ast, SyntaxError};
use crate::automata::subset::subset_construction;
use crate::automata::table::ScanTable;
use crate::automata::thompson::build_nfa;
use crate::automata::{Dfa, Nfa};

/// Error from compiling a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A pattern failed to parse. `rule` is the 0-based index of the
    /// offending rule (for [`compile_rules`], its 0-based line number).
    Syntax {
        rule: usize,
        error: SyntaxError,
    },
    /// The rule set contains no patterns.
    NoRules,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Syntax { rule, error } => {
                write!(f, "rule {}: {}", rule, error)
            }
            CompileError::NoRules => write!(f, "rule set is empty"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Syntax { error, .. } => Some(error),
            CompileError::NoRules => None,
        }
    }
}

/// Per-stage size counters, for logging and regression tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    /// Number of rules compiled.
    pub num_rules: usize,
    /// NFA states after Thompson construction.
    pub nfa_states: usize,
    /// DFA states after subset construction.
    pub dfa_states: usize,
    /// DFA states after minimization.
    pub min_states: usize,
    /// Alphabet equivalence classes.
    pub num_classes: usize,
}

/// Result of a successful compilation: the flattened table plus stage stats.
#[derive(Debug, Clone)]
pub struct CompiledScanner {
    pub table: ScanTable,
    pub stats: PipelineStats,
}

impl CompiledScanner {
    /// Emit a standalone Rust scanner module for this rule set.
    pub fn emit_rust(&self) -> String {
        generate_scanner_string(&self.table)
    }
}

/// All intermediate artifacts of a compilation, retained for inspection
/// (DOT dumps, debugging, tests that compare stages against each other).
#[derive(Debug, Clone)]
pub struct CompiledArtifacts {
    pub asts: Vec<Ast>,
    pub nfa: Nfa,
    pub partition: AlphabetPartition,
    pub dfa: Dfa,
    pub min_dfa: Dfa,
    pub table: ScanTable,
    pub stats: PipelineStats,
}

/// Compile an ordered list of regex patterns into a scanner.
///
/// The list index of each pattern becomes its category; on overlapping
/// longest matches the lowest category wins.
///
/// # Errors
///
/// Stops at the first pattern that fails to parse, identifying it by index;
/// an empty list is rejected.
pub fn compile(patterns: &[&str]) -> Result<CompiledScanner, CompileError> {
    let artifacts = compile_with_artifacts(patterns)?;
    Ok(CompiledScanner { table: artifacts.table, stats: artifacts.stats })
}

/// Compile, keeping every intermediate stage.
pub fn compile_with_artifacts(patterns: &[&str]) -> Result<CompiledArtifacts, CompileError> {
    if patterns.is_empty() {
        return Err(CompileError::NoRules);
    }

    let mut asts = Vec::with_capacity(patterns.len());
    for (rule, pattern) in patterns.iter().enumerate() {
        let ast =
            parse_pattern(pattern).map_err(|error| CompileError::Syntax { rule, error })?;
        asts.push(ast);
    }

    let nfa = build_nfa(&asts);
    debug!("thompson: {} rules -> {} NFA states", asts.len(), nfa.states.len());

    let partition = compute_equivalence_classes(&nfa);
    debug!("partition: 256 bytes -> {} classes", partition.num_classes);

    let dfa = subset_construction(&nfa, &partition);
    debug!("subset: {} DFA states", dfa.states.len());

    let min_dfa = minimize_dfa(&dfa);
    debug!("minimize: {} -> {} DFA states", dfa.states.len(), min_dfa.states.len());

    let stats = PipelineStats {
        num_rules: asts.len(),
        nfa_states: nfa.states.len(),
        dfa_states: dfa.states.len(),
        min_states: min_dfa.states.len(),
        num_classes: partition.num_classes,
    };

    let table = ScanTable::from_dfa(&min_dfa, &partition);
    Ok(CompiledArtifacts { asts, nfa, partition, dfa, min_dfa, table, stats })
}

/// Compile a rule file: one regex per line, categories numbered by the order
/// of non-blank lines. Blank lines are skipped; there is no comment syntax,
/// a leading `#` is part of the pattern.
///
/// # Errors
///
/// Stops at the first line that fails to parse, identified by its 0-based
/// line number in `rules`.
pub fn compile_rules(rules: &str) -> Result<CompiledScanner, CompileError> {
    let mut patterns: Vec<&str> = Vec::new();
    let mut lines: Vec<usize> = Vec::new();
    for (line_no, line) in rules.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        patterns.push(line);
        lines.push(line_no);
    }

    compile(&patterns).map_err(|err| match err {
        CompileError::Syntax { rule, error } => {
            CompileError::Syntax { rule: lines[rule], error }
        }
        other => other,
    })
}
