//! Language-agnostic analysis IR.
//!
//! This crate defines the normalized tree that language frontends produce
//! for the analysis engine: the closed [`Tag`]/[`Operator`] vocabulary, the
//! `{tag, contents}` node model with its 0/1/many arity rule, binding
//! [`Pattern`]s, and the builder helpers that keep every composite shape
//! canonical.
//!
//! Nodes are construct-once, read-many values; the wire form is JSON via
//! serde.

pub mod builder;
mod node;
mod tag;

pub use node::{Contents, Ir, Value};
pub use tag::{Operator, Tag};
pub use builder::Pattern;
