//! Tag and operator vocabulary for the analysis IR.
//!
//! `Tag` is the closed set of node discriminators a frontend may emit;
//! `Operator` is the closed set of primitive operation names that appear as
//! the payload of a `Primitive` message. Both serialize as their wire name.

use std::fmt;

use serde::{Serialize, Serializer};

/// Every kind of IR node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    // ── Literals ───────────────────────────────────────────────────────
    MuNull,
    MuBool,
    MuNumber,
    MuString,
    MuSymbol,
    MuList,

    // ── Expressions ────────────────────────────────────────────────────
    /// The receiver of an implicit send.
    SelfRef,
    Reference,
    /// A closed-set operation used in message position; payload is an
    /// [`Operator`] name.
    Primitive,
    Assignment,
    Send,
    Lambda,
    Sequence,
    If,
    Return,
    For,
    Generator,
    Try,

    // ── Definitions ────────────────────────────────────────────────────
    Method,
    /// Equality-protocol method (`==`, `equal?`, `eql?`).
    EqualMethod,
    /// Hash-code-protocol method (`hash`).
    HashMethod,
    UnguardedBody,
    Class,
    /// A module definition.
    Object,
    EigenClass,
    Decorator,
    /// Marker carried by a [`Tag::Decorator`] around class-level methods.
    Classy,

    // ── Patterns ───────────────────────────────────────────────────────
    WildcardPattern,
    VariablePattern,
    TypePattern,
    UnionPattern,
    AsPattern,
    OtherPattern,

    /// Opaque fallback for constructs outside the IR vocabulary.
    Other,
}

impl Tag {
    /// The wire name of this tag.
    pub fn name(self) -> &'static str {
        match self {
            Tag::MuNull => "MuNull",
            Tag::MuBool => "MuBool",
            Tag::MuNumber => "MuNumber",
            Tag::MuString => "MuString",
            Tag::MuSymbol => "MuSymbol",
            Tag::MuList => "MuList",
            Tag::SelfRef => "Self",
            Tag::Reference => "Reference",
            Tag::Primitive => "Primitive",
            Tag::Assignment => "Assignment",
            Tag::Send => "Send",
            Tag::Lambda => "Lambda",
            Tag::Sequence => "Sequence",
            Tag::If => "If",
            Tag::Return => "Return",
            Tag::For => "For",
            Tag::Generator => "Generator",
            Tag::Try => "Try",
            Tag::Method => "Method",
            Tag::EqualMethod => "EqualMethod",
            Tag::HashMethod => "HashMethod",
            Tag::UnguardedBody => "UnguardedBody",
            Tag::Class => "Class",
            Tag::Object => "Object",
            Tag::EigenClass => "EigenClass",
            Tag::Decorator => "Decorator",
            Tag::Classy => "Classy",
            Tag::WildcardPattern => "WildcardPattern",
            Tag::VariablePattern => "VariablePattern",
            Tag::TypePattern => "TypePattern",
            Tag::UnionPattern => "UnionPattern",
            Tag::AsPattern => "AsPattern",
            Tag::OtherPattern => "OtherPattern",
            Tag::Other => "Other",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A primitive operation identifier, distinct from an arbitrary named
/// message reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    Negation,
    And,
    Or,
    Hash,
    GreaterOrEqualThan,
    GreaterThan,
    LessOrEqualThan,
    LessThan,
    Plus,
    Minus,
    Multiply,
    Divide,
    Size,
}

impl Operator {
    /// The wire name of this operator.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Equal => "Equal",
            Operator::NotEqual => "NotEqual",
            Operator::Negation => "Negation",
            Operator::And => "And",
            Operator::Or => "Or",
            Operator::Hash => "Hash",
            Operator::GreaterOrEqualThan => "GreaterOrEqualThan",
            Operator::GreaterThan => "GreaterThan",
            Operator::LessOrEqualThan => "LessOrEqualThan",
            Operator::LessThan => "LessThan",
            Operator::Plus => "Plus",
            Operator::Minus => "Minus",
            Operator::Multiply => "Multiply",
            Operator::Divide => "Divide",
            Operator::Size => "Size",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
