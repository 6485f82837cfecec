//! The IR node model and its wire serialization.
//!
//! Every node is a `{tag, contents}` pair where `contents` follows the
//! arity rule: omitted when the node carries no payload, a bare value when
//! it carries exactly one logical payload, and an ordered list otherwise.
//! The rule is decided by the payload handed to the constructors, never by
//! flattening — a single payload that happens to be a list stays a single
//! payload and still serializes as a JSON array.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::tag::Tag;

/// An IR node.
///
/// Construct through [`Ir::leaf`], [`Ir::unary`], [`Ir::nary`] or the
/// helpers in [`crate::builder`]; the constructors are the only place the
/// arity rule is decided.
#[derive(Debug, Clone, PartialEq)]
pub struct Ir {
    tag: Tag,
    contents: Contents,
}

/// The payload of an IR node.
#[derive(Debug, Clone, PartialEq)]
pub enum Contents {
    /// No payload; `contents` is omitted on the wire.
    None,
    /// Exactly one logical payload, serialized bare (a list payload
    /// serializes as an array, but it is still one payload).
    One(Box<Value>),
    /// Two or more payloads, serialized as an ordered array.
    Many(Vec<Value>),
}

/// A payload value: a nested node, a scalar, an ordered list, or null.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Node(Ir),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Null,
}

impl Ir {
    /// A node with no payload.
    pub fn leaf(tag: Tag) -> Self {
        Ir {
            tag,
            contents: Contents::None,
        }
    }

    /// A node with exactly one logical payload.
    pub fn unary(tag: Tag, value: Value) -> Self {
        Ir {
            tag,
            contents: Contents::One(Box::new(value)),
        }
    }

    /// A node with an ordered list of payloads.
    ///
    /// Routes through the arity rule: zero values is a leaf and one value
    /// is unary, so callers assembling payloads positionally cannot end up
    /// with a spurious one-element contents list.
    pub fn nary(tag: Tag, values: Vec<Value>) -> Self {
        let contents = match values.len() {
            0 => Contents::None,
            1 => {
                let mut values = values;
                Contents::One(Box::new(values.remove(0)))
            }
            _ => Contents::Many(values),
        };
        Ir { tag, contents }
    }

    /// The node's discriminator.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The node's payload.
    pub fn contents(&self) -> &Contents {
        &self.contents
    }
}

impl From<Ir> for Value {
    fn from(node: Ir) -> Self {
        Value::Node(node)
    }
}

impl Serialize for Ir {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.contents {
            Contents::None => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("tag", &self.tag)?;
                map.end()
            }
            Contents::One(value) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("tag", &self.tag)?;
                map.serialize_entry("contents", value.as_ref())?;
                map.end()
            }
            Contents::Many(values) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("tag", &self.tag)?;
                map.serialize_entry("contents", values)?;
                map.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Node(node) => node.serialize(serializer),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Null => serializer.serialize_unit(),
        }
    }
}
