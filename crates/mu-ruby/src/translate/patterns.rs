//! Binding patterns: rescue-clause selection and parameter lists.

use mu_ir::Pattern;

use crate::cst::{CstChild, CstNode, NodeKind};

use super::const_name;

/// Select the pattern of one rescue clause from its exception-type list
/// and bound variable.
///
/// No types and no name matches anything; a name alone binds it; types
/// alone match by type (a union when there are several, in declaration
/// order); both bind the name over the type pattern.
pub(crate) fn rescue_pattern(resbody: &CstNode) -> Pattern {
    let types = resbody.node_at(0);
    let variable = resbody.node_at(1).and_then(super::binding_name);
    match (types, variable) {
        (None, None) => Pattern::Wildcard,
        (None, Some(name)) => Pattern::Variable(name),
        (Some(types), None) => exception_types(types),
        (Some(types), Some(name)) => Pattern::As(name, Box::new(exception_types(types))),
    }
}

fn exception_types(list: &CstNode) -> Pattern {
    let mut patterns: Vec<Pattern> = list.children().iter().map(type_pattern).collect();
    if patterns.len() == 1 {
        patterns.remove(0)
    } else {
        Pattern::Union(patterns)
    }
}

fn type_pattern(entry: &CstChild) -> Pattern {
    match entry.as_node().and_then(const_name) {
        Some(name) => Pattern::Type(name),
        None => Pattern::Other(entry.to_string()),
    }
}

/// The pattern of one parameter-list entry.
///
/// Plain and splat parameters bind a variable; `procarg0` unwraps to its
/// inner parameter; default values, keyword arguments and destructuring
/// forms are outside the IR vocabulary and degrade to an opaque pattern.
pub(crate) fn param_pattern(entry: &CstChild) -> Pattern {
    match entry {
        CstChild::Node(node) => param_pattern_node(node),
        other => Pattern::Other(other.to_string()),
    }
}

fn param_pattern_node(node: &CstNode) -> Pattern {
    match node.kind() {
        NodeKind::Arg | NodeKind::Restarg | NodeKind::Procarg0 => match node.child(0) {
            Some(CstChild::Str(name)) => Pattern::Variable(name.clone()),
            Some(CstChild::Node(inner)) => param_pattern_node(inner),
            _ => Pattern::Other(node.sexp()),
        },
        NodeKind::Optarg => Pattern::Other(node.sexp()),
        _ => Pattern::Other(node.sexp()),
    }
}
