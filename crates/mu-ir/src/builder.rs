//! Constructors for the composite IR shapes.
//!
//! Frontends assemble IR exclusively through these helpers (plus the raw
//! [`Ir::leaf`]/[`Ir::unary`]/[`Ir::nary`] constructors), so the arity rule
//! and the canonical composite shapes — `Send`, `Method` clauses, pattern
//! nodes — are decided in one place.

use crate::node::{Ir, Value};
use crate::tag::{Operator, Tag};

/// The no-op node: a first-class stand-in for an absent branch or empty
/// body, so every IR slot holds a well-formed node.
pub fn none() -> Ir {
    Ir::leaf(Tag::MuNull)
}

/// Assemble a statement block.
///
/// Zero parts is the no-op node; exactly one part is that part, unwrapped;
/// two or more parts form an explicit `Sequence` in original order.
pub fn sequence(parts: Vec<Ir>) -> Ir {
    let mut parts = parts;
    match parts.len() {
        0 => none(),
        1 => parts.remove(0),
        _ => Ir::nary(Tag::Sequence, parts.into_iter().map(Value::Node).collect()),
    }
}

/// A named reference in expression or message position.
pub fn reference(name: impl Into<String>) -> Ir {
    Ir::unary(Tag::Reference, Value::Str(name.into()))
}

/// A closed-set operation in message position.
pub fn primitive(op: Operator) -> Ir {
    Ir::unary(Tag::Primitive, Value::Str(op.name().into()))
}

/// The receiver of an implicit send.
pub fn self_ref() -> Ir {
    Ir::leaf(Tag::SelfRef)
}

/// `Send = (receiver, message, [arguments])`.
pub fn send(receiver: Ir, message: Ir, args: Vec<Ir>) -> Ir {
    Ir::nary(
        Tag::Send,
        vec![
            Value::Node(receiver),
            Value::Node(message),
            Value::List(args.into_iter().map(Value::Node).collect()),
        ],
    )
}

/// A send whose message is a plain named reference.
pub fn simple_send(receiver: Ir, name: impl Into<String>, args: Vec<Ir>) -> Ir {
    send(receiver, reference(name), args)
}

/// `Assignment = (name, value)`.
pub fn assignment(name: impl Into<String>, value: Ir) -> Ir {
    Ir::nary(Tag::Assignment, vec![Value::Str(name.into()), Value::Node(value)])
}

/// One unguarded clause: `(paramPatterns, UnguardedBody(body))`.
fn clause(params: Vec<Ir>, body: Ir) -> Value {
    Value::List(vec![
        Value::List(params.into_iter().map(Value::Node).collect()),
        Value::Node(Ir::unary(Tag::UnguardedBody, Value::Node(body))),
    ])
}

/// `Method = (name, [(paramPatterns, UnguardedBody(body))])`.
pub fn method(name: impl Into<String>, params: Vec<Ir>, body: Ir) -> Ir {
    Ir::nary(
        Tag::Method,
        vec![Value::Str(name.into()), Value::List(vec![clause(params, body)])],
    )
}

/// A protocol method (`EqualMethod`/`HashMethod`): one unguarded clause,
/// no name.
pub fn primitive_method(tag: Tag, params: Vec<Ir>, body: Ir) -> Ir {
    Ir::unary(tag, Value::List(vec![clause(params, body)]))
}

/// `Lambda = (paramPatterns, body)`.
pub fn lambda(params: Vec<Ir>, body: Ir) -> Ir {
    Ir::nary(
        Tag::Lambda,
        vec![
            Value::List(params.into_iter().map(Value::Node).collect()),
            Value::Node(body),
        ],
    )
}

/// `Try = (body, [(pattern, handler)], finally)`.
pub fn mu_try(body: Ir, catches: Vec<(Ir, Ir)>, finally: Ir) -> Ir {
    Ir::nary(
        Tag::Try,
        vec![
            Value::Node(body),
            Value::List(
                catches
                    .into_iter()
                    .map(|(pattern, handler)| {
                        Value::List(vec![Value::Node(pattern), Value::Node(handler)])
                    })
                    .collect(),
            ),
            Value::Node(finally),
        ],
    )
}

// ── Literals ───────────────────────────────────────────────────────────

/// A list literal. Its contents is always a list, even empty or singleton.
pub fn mu_list(items: Vec<Ir>) -> Ir {
    Ir::unary(Tag::MuList, Value::List(items.into_iter().map(Value::Node).collect()))
}

pub fn mu_bool(value: bool) -> Ir {
    Ir::unary(Tag::MuBool, Value::Bool(value))
}

pub fn mu_int(value: i64) -> Ir {
    Ir::unary(Tag::MuNumber, Value::Int(value))
}

pub fn mu_float(value: f64) -> Ir {
    Ir::unary(Tag::MuNumber, Value::Float(value))
}

pub fn mu_string(value: impl Into<String>) -> Ir {
    Ir::unary(Tag::MuString, Value::Str(value.into()))
}

pub fn mu_symbol(value: impl Into<String>) -> Ir {
    Ir::unary(Tag::MuSymbol, Value::Str(value.into()))
}

/// The opaque fallback leaf: a non-normative textual snapshot of an
/// unmodeled construct, and no modeled subexpression.
pub fn other(text: impl Into<String>) -> Ir {
    Ir::nary(Tag::Other, vec![Value::Str(text.into()), Value::Null])
}

// ── Patterns ───────────────────────────────────────────────────────────

/// A binding pattern inside exception handlers and parameter lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Matches anything, binds nothing.
    Wildcard,
    /// Binds the matched value to a name.
    Variable(String),
    /// Matches by exception/type name.
    Type(String),
    /// Matches any of the alternatives, in declaration order.
    Union(Vec<Pattern>),
    /// Binds a name and delegates to an inner pattern.
    As(String, Box<Pattern>),
    /// Opaque fallback for unmodeled parameter forms.
    Other(String),
}

impl Pattern {
    /// The IR node form of this pattern.
    pub fn into_ir(self) -> Ir {
        match self {
            Pattern::Wildcard => Ir::leaf(Tag::WildcardPattern),
            Pattern::Variable(name) => Ir::unary(Tag::VariablePattern, Value::Str(name)),
            Pattern::Type(name) => Ir::unary(Tag::TypePattern, Value::Str(name)),
            Pattern::Union(alternatives) => Ir::unary(
                Tag::UnionPattern,
                Value::List(
                    alternatives
                        .into_iter()
                        .map(|p| Value::Node(p.into_ir()))
                        .collect(),
                ),
            ),
            Pattern::As(name, inner) => Ir::nary(
                Tag::AsPattern,
                vec![Value::Str(name), Value::Node(inner.into_ir())],
            ),
            Pattern::Other(text) => {
                Ir::nary(Tag::OtherPattern, vec![Value::Str(text), Value::Null])
            }
        }
    }
}
