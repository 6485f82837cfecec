//! Adapter around the external Ruby parser.
//!
//! The lexer/parser lives outside this crate; this module owns the
//! boundary: the grammar-feature switches the parser must run with, the
//! invocation of a parser executable, the decoding of its CST output, and
//! the two-tier error policy. Parser diagnostics are always fatal — a
//! syntactically invalid input yields no IR at all, never a partial tree.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use mu_ir::{builder, Ir};
use serde::Serialize;

use crate::cst::{self, CstError, CstNode};
use crate::translate;

/// Grammar features the external parser must emit the CST with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParserOptions {
    /// Emit closure literals as distinct `lambda` nodes.
    pub emit_lambda: bool,
    /// Wrap single block parameters in `procarg0` nodes.
    pub emit_procarg0: bool,
}

/// The fixed, process-wide parser configuration. Applying it is
/// idempotent; every adapter is built from it.
pub const GRAMMAR_OPTIONS: ParserOptions = ParserOptions {
    emit_lambda: true,
    emit_procarg0: true,
};

impl ParserOptions {
    fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.emit_lambda {
            flags.push("--emit-lambda");
        }
        if self.emit_procarg0 {
            flags.push("--emit-procarg0");
        }
        flags
    }
}

/// A fatal parse failure. No IR accompanies any of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseError {
    /// The parser rejected the source with a diagnostic.
    Syntax(String),
    /// The parser could not be invoked.
    Parser(String),
    /// The parser accepted the source but its output is not a CST.
    Malformed(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(message) => write!(f, "syntax error: {message}"),
            ParseError::Parser(message) => write!(f, "parser invocation failed: {message}"),
            ParseError::Malformed(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<CstError> for ParseError {
    fn from(err: CstError) -> Self {
        ParseError::Malformed(err.to_string())
    }
}

/// The external-parser contract: source text in, CST out, every
/// diagnostic fatal. `Ok(None)` is the empty program.
pub trait CstParser {
    fn parse_cst(&self, source: &str) -> Result<Option<CstNode>, ParseError>;
}

/// Invokes a parser executable: source on stdin, JSON CST on stdout,
/// diagnostics on stderr with a nonzero exit status.
#[derive(Debug, Clone)]
pub struct CommandParser {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandParser {
    /// An adapter around `program`, configured with [`GRAMMAR_OPTIONS`].
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandParser {
            program: program.into(),
            args: GRAMMAR_OPTIONS.flags().iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The arguments the parser executable is invoked with.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl CstParser for CommandParser {
    fn parse_cst(&self, source: &str) -> Result<Option<CstNode>, ParseError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ParseError::Parser(format!("cannot spawn {}: {e}", self.program.display()))
            })?;

        // Closing stdin signals end of source to the parser.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| ParseError::Parser(format!("cannot write source: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ParseError::Parser(format!("cannot read parser output: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = stderr.lines().next().unwrap_or("syntax error").to_string();
            return Err(ParseError::Syntax(diagnostic));
        }

        let value: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| ParseError::Malformed(format!("malformed CST: {e}")))?;
        Ok(cst::from_json(&value)?)
    }
}

/// Parse and translate: the full `source → IR` pipeline over any parser.
pub fn parse_with<P: CstParser + ?Sized>(parser: &P, source: &str) -> Result<Ir, ParseError> {
    Ok(match parser.parse_cst(source)? {
        Some(node) => translate::translate(&node),
        None => builder::none(),
    })
}

/// The registration value handed to the hosting analysis engine: a
/// language name and the parse entry point.
pub struct Language {
    name: String,
    parser: Box<dyn CstParser>,
}

impl Language {
    pub fn new(name: impl Into<String>, parser: impl CstParser + 'static) -> Self {
        Language {
            name: name.into(),
            parser: Box::new(parser),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Translate one source text, or fail with a fatal parse signal.
    pub fn parse(&self, source: &str) -> Result<Ir, ParseError> {
        parse_with(self.parser.as_ref(), source)
    }
}

/// Register Ruby over the given parser.
pub fn language(parser: impl CstParser + 'static) -> Language {
    Language::new("Ruby", parser)
}
