//! Concrete syntax tree handed over by the external Ruby parser.
//!
//! A CST node is a kind discriminator plus an ordered list of children;
//! children are sub-nodes or literal scalars. The tree is owned by one
//! translation call and never mutated.
//!
//! On the wire a node is a JSON array whose head is the kind string and
//! whose tail is the children; scalar children are JSON strings/numbers and
//! an absent child is `null`. Anything else is a parser-contract violation
//! and is rejected outright.

use std::fmt;

/// The kind of a CST node.
///
/// Enumerates the kinds this frontend models; every other kind string is
/// captured verbatim by [`NodeKind::Unknown`] and funnels to the opaque
/// fallback during dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Class,
    Sclass,
    Module,
    Begin,
    Kwbegin,
    Rescue,
    Resbody,
    Ensure,
    Irange,
    Regexp,
    Dstr,
    Or,
    And,
    Return,
    Def,
    Defs,
    Block,
    Lambda,
    Send,
    Nil,
    SelfKw,
    Arg,
    Restarg,
    Procarg0,
    Optarg,
    For,
    Str,
    Sym,
    Int,
    Float,
    If,
    Lvar,
    Ivar,
    Lvasgn,
    Ivasgn,
    Casgn,
    OpAsgn,
    OrAsgn,
    AndAsgn,
    Const,
    True,
    False,
    Array,
    /// Any kind this frontend does not model, kept verbatim.
    Unknown(String),
}

impl NodeKind {
    /// Map a parser kind string to a [`NodeKind`].
    pub fn from_kind_str(kind: &str) -> NodeKind {
        match kind {
            "class" => NodeKind::Class,
            "sclass" => NodeKind::Sclass,
            "module" => NodeKind::Module,
            "begin" => NodeKind::Begin,
            "kwbegin" => NodeKind::Kwbegin,
            "rescue" => NodeKind::Rescue,
            "resbody" => NodeKind::Resbody,
            "ensure" => NodeKind::Ensure,
            "irange" => NodeKind::Irange,
            "regexp" => NodeKind::Regexp,
            "dstr" => NodeKind::Dstr,
            "or" => NodeKind::Or,
            "and" => NodeKind::And,
            "return" => NodeKind::Return,
            "def" => NodeKind::Def,
            "defs" => NodeKind::Defs,
            "block" => NodeKind::Block,
            "lambda" => NodeKind::Lambda,
            "send" => NodeKind::Send,
            "nil" => NodeKind::Nil,
            "self" => NodeKind::SelfKw,
            "arg" => NodeKind::Arg,
            "restarg" => NodeKind::Restarg,
            "procarg0" => NodeKind::Procarg0,
            "optarg" => NodeKind::Optarg,
            "for" => NodeKind::For,
            "str" => NodeKind::Str,
            "sym" => NodeKind::Sym,
            "int" => NodeKind::Int,
            "float" => NodeKind::Float,
            "if" => NodeKind::If,
            "lvar" => NodeKind::Lvar,
            "ivar" => NodeKind::Ivar,
            "lvasgn" => NodeKind::Lvasgn,
            "ivasgn" => NodeKind::Ivasgn,
            "casgn" => NodeKind::Casgn,
            "op_asgn" => NodeKind::OpAsgn,
            "or_asgn" => NodeKind::OrAsgn,
            "and_asgn" => NodeKind::AndAsgn,
            "const" => NodeKind::Const,
            "true" => NodeKind::True,
            "false" => NodeKind::False,
            "array" => NodeKind::Array,
            other => NodeKind::Unknown(other.to_string()),
        }
    }

    /// The parser's kind string.
    pub fn as_kind_str(&self) -> &str {
        match self {
            NodeKind::Class => "class",
            NodeKind::Sclass => "sclass",
            NodeKind::Module => "module",
            NodeKind::Begin => "begin",
            NodeKind::Kwbegin => "kwbegin",
            NodeKind::Rescue => "rescue",
            NodeKind::Resbody => "resbody",
            NodeKind::Ensure => "ensure",
            NodeKind::Irange => "irange",
            NodeKind::Regexp => "regexp",
            NodeKind::Dstr => "dstr",
            NodeKind::Or => "or",
            NodeKind::And => "and",
            NodeKind::Return => "return",
            NodeKind::Def => "def",
            NodeKind::Defs => "defs",
            NodeKind::Block => "block",
            NodeKind::Lambda => "lambda",
            NodeKind::Send => "send",
            NodeKind::Nil => "nil",
            NodeKind::SelfKw => "self",
            NodeKind::Arg => "arg",
            NodeKind::Restarg => "restarg",
            NodeKind::Procarg0 => "procarg0",
            NodeKind::Optarg => "optarg",
            NodeKind::For => "for",
            NodeKind::Str => "str",
            NodeKind::Sym => "sym",
            NodeKind::Int => "int",
            NodeKind::Float => "float",
            NodeKind::If => "if",
            NodeKind::Lvar => "lvar",
            NodeKind::Ivar => "ivar",
            NodeKind::Lvasgn => "lvasgn",
            NodeKind::Ivasgn => "ivasgn",
            NodeKind::Casgn => "casgn",
            NodeKind::OpAsgn => "op_asgn",
            NodeKind::OrAsgn => "or_asgn",
            NodeKind::AndAsgn => "and_asgn",
            NodeKind::Const => "const",
            NodeKind::True => "true",
            NodeKind::False => "false",
            NodeKind::Array => "array",
            NodeKind::Unknown(s) => s,
        }
    }
}

/// A CST node: kind plus ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct CstNode {
    kind: NodeKind,
    children: Vec<CstChild>,
}

/// A child slot of a CST node: a sub-node, a literal scalar, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum CstChild {
    Node(CstNode),
    Str(String),
    Int(i64),
    Float(f64),
    /// An absent child. A slot is always present in the child list even
    /// when the source construct left it out.
    Null,
}

impl CstNode {
    pub fn new(kind: NodeKind, children: Vec<CstChild>) -> Self {
        CstNode { kind, children }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[CstChild] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&CstChild> {
        self.children.get(index)
    }

    /// The child at `index`, when it is a sub-node.
    pub fn node_at(&self, index: usize) -> Option<&CstNode> {
        match self.children.get(index) {
            Some(CstChild::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// The child at `index`, when it is a string scalar (names, symbols,
    /// operator spellings).
    pub fn str_at(&self, index: usize) -> Option<&str> {
        match self.children.get(index) {
            Some(CstChild::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Non-normative s-expression rendering, used as the payload of the
    /// opaque fallback nodes.
    pub fn sexp(&self) -> String {
        self.to_string()
    }
}

impl CstChild {
    pub fn as_node(&self) -> Option<&CstNode> {
        match self {
            CstChild::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CstChild::Null)
    }
}

impl fmt::Display for CstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.kind.as_kind_str())?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for CstChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CstChild::Node(node) => node.fmt(f),
            CstChild::Str(s) => write!(f, ":{s}"),
            CstChild::Int(n) => write!(f, "{n}"),
            CstChild::Float(n) => write!(f, "{n}"),
            CstChild::Null => write!(f, "nil"),
        }
    }
}

/// A malformed CST payload from the external parser.
///
/// Distinct from a syntax diagnostic: the parser accepted the source but
/// handed over something that is not a CST. Both are fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct CstError {
    message: String,
}

impl CstError {
    fn new(message: impl Into<String>) -> Self {
        CstError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed CST: {}", self.message)
    }
}

impl std::error::Error for CstError {}

/// Decode the parser's JSON encoding of a CST.
///
/// `null` is a valid encoding of the empty program and decodes to `None`.
pub fn from_json(value: &serde_json::Value) -> Result<Option<CstNode>, CstError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Array(_) => decode_node(value).map(Some),
        other => Err(CstError::new(format!(
            "expected a node array or null at the root, got {other}"
        ))),
    }
}

fn decode_node(value: &serde_json::Value) -> Result<CstNode, CstError> {
    let items = value
        .as_array()
        .ok_or_else(|| CstError::new(format!("expected a node array, got {value}")))?;
    let kind = items
        .first()
        .and_then(|head| head.as_str())
        .ok_or_else(|| CstError::new(format!("node array must start with a kind string: {value}")))?;
    let children = items[1..]
        .iter()
        .map(decode_child)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CstNode::new(NodeKind::from_kind_str(kind), children))
}

fn decode_child(value: &serde_json::Value) -> Result<CstChild, CstError> {
    match value {
        serde_json::Value::Null => Ok(CstChild::Null),
        serde_json::Value::String(s) => Ok(CstChild::Str(s.clone())),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(CstChild::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(CstChild::Float(f))
            } else {
                Err(CstError::new(format!("unrepresentable number: {n}")))
            }
        }
        serde_json::Value::Array(_) => decode_node(value).map(CstChild::Node),
        other => Err(CstError::new(format!("unexpected child value: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn kind_round_trips_and_defaults_to_unknown() {
        assert_eq!(NodeKind::from_kind_str("send"), NodeKind::Send);
        assert_eq!(NodeKind::from_kind_str("op_asgn"), NodeKind::OpAsgn);
        assert_eq!(
            NodeKind::from_kind_str("hash"),
            NodeKind::Unknown("hash".into())
        );
        assert_eq!(NodeKind::Unknown("hash".into()).as_kind_str(), "hash");
    }

    #[test]
    fn decodes_nested_nodes_and_scalars() {
        let cst = from_json(&json!(["send", ["int", 4], "+", ["int", 5]]))
            .unwrap()
            .unwrap();
        assert_eq!(cst.kind(), &NodeKind::Send);
        assert_eq!(cst.node_at(0).unwrap().kind(), &NodeKind::Int);
        assert_eq!(cst.str_at(1), Some("+"));
        assert_eq!(cst.sexp(), "(send (int 4) :+ (int 5))");
    }

    #[test]
    fn null_root_is_the_empty_program() {
        assert_eq!(from_json(&json!(null)), Ok(None));
    }

    #[test]
    fn null_children_stay_as_slots() {
        let cst = from_json(&json!(["class", ["const", null, "Foo"], null, null]))
            .unwrap()
            .unwrap();
        assert_eq!(cst.children().len(), 3);
        assert!(cst.child(1).unwrap().is_null());
        assert_eq!(cst.node_at(0).unwrap().str_at(1), Some("Foo"));
    }

    #[test]
    fn rejects_non_cst_payloads() {
        assert!(from_json(&json!({"kind": "send"})).is_err());
        assert!(from_json(&json!([42, "send"])).is_err());
        assert!(from_json(&json!(["send", true])).is_err());
    }
}
