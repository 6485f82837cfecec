//! Ruby frontend for the mu analysis IR.
//!
//! Translates the concrete syntax tree produced by an external Ruby parser
//! into the normalized, language-agnostic IR consumed by the analysis
//! engine. The pipeline is `adapter` (invoke the parser, decode its CST,
//! fatal on any diagnostic) → `translate` (recursive kind dispatch and
//! desugaring) → `mu_ir` tree.
//!
//! Valid-but-unmodeled constructs never fail translation; they degrade to
//! the opaque `Other` leaf so the surrounding structure stays analyzable.

pub mod adapter;
mod context;
pub mod cst;
mod translate;

pub use adapter::{
    language, parse_with, CommandParser, CstParser, Language, ParseError, ParserOptions,
    GRAMMAR_OPTIONS,
};
pub use translate::translate;

use mu_ir::{builder, Ir};

/// Decode a JSON-encoded CST and translate it. `null` is the empty
/// program. Intended for embedders that already hold the parser's output.
pub fn translate_json(value: &serde_json::Value) -> Result<Ir, ParseError> {
    Ok(match cst::from_json(value)? {
        Some(node) => translate(&node),
        None => builder::none(),
    })
}
