//! Recursive-descent translation from the Ruby CST to the analysis IR.
//!
//! Dispatch is a single match on the node kind, one handler per kind. An
//! absent child always translates to the no-op node, never to a missing
//! slot. Unrecognized kinds are not an error: they become an opaque
//! `Other` leaf carrying an s-expression snapshot of the subtree, so the
//! surrounding recognized structure stays analyzable.

mod assign;
mod ops;
mod patterns;

use mu_ir::{builder, Ir, Pattern, Tag, Value};

use crate::context::{Context, Frame};
use crate::cst::{CstChild, CstNode, NodeKind};

/// Translate one CST into IR. Total: well-formed CST input never fails.
pub fn translate(node: &CstNode) -> Ir {
    eval(Some(node), &Context::top())
}

/// Translate a child slot; an absent child is the no-op node.
pub(crate) fn eval(node: Option<&CstNode>, ctx: &Context) -> Ir {
    let Some(node) = node else {
        return builder::none();
    };
    match node.kind() {
        // ── Definitions ────────────────────────────────────────────────
        NodeKind::Module => module(node, ctx),
        NodeKind::Class => class(node, ctx),
        NodeKind::Sclass => sclass(node, ctx),
        NodeKind::Def => def(node, ctx),
        NodeKind::Defs => defs(node, ctx),

        // ── Statements and control flow ────────────────────────────────
        NodeKind::Begin => begin(node, ctx),
        NodeKind::Kwbegin => eval(node.node_at(0), ctx),
        NodeKind::Rescue => {
            let (body, catches) = rescue_parts(node, ctx);
            builder::mu_try(body, catches, builder::none())
        }
        NodeKind::Ensure => ensure(node, ctx),
        NodeKind::If => Ir::nary(
            Tag::If,
            vec![
                eval(node.node_at(0), ctx).into(),
                eval(node.node_at(1), ctx).into(),
                eval(node.node_at(2), ctx).into(),
            ],
        ),
        NodeKind::Return => Ir::unary(Tag::Return, eval(node.node_at(0), ctx).into()),
        NodeKind::For => for_loop(node, ctx),

        // ── Sends and operators ────────────────────────────────────────
        NodeKind::Send => send(node, vec![], ctx),
        NodeKind::Block => block(node, ctx),
        NodeKind::Or => connective(node, mu_ir::Operator::Or, ctx),
        NodeKind::And => connective(node, mu_ir::Operator::And, ctx),

        // ── Assignments ────────────────────────────────────────────────
        NodeKind::Lvasgn | NodeKind::Ivasgn => match binding_name(node) {
            Some(name) => builder::assignment(name, eval(node.node_at(1), ctx)),
            None => fallback(node),
        },
        NodeKind::Casgn => match node.str_at(1) {
            Some(name) => builder::assignment(name, eval(node.node_at(2), ctx)),
            None => fallback(node),
        },
        NodeKind::OpAsgn => {
            let desugared = node.node_at(0).zip(node.str_at(1)).and_then(|(assignee, op)| {
                assign::compound(assignee, op, node.node_at(2), ctx)
            });
            desugared.unwrap_or_else(|| fallback(node))
        }
        NodeKind::OrAsgn => logical_assign(node, "||", ctx),
        NodeKind::AndAsgn => logical_assign(node, "&&", ctx),

        // ── References and literals ────────────────────────────────────
        NodeKind::Lvar | NodeKind::Ivar => match node.str_at(0) {
            Some(name) => builder::reference(name),
            None => fallback(node),
        },
        NodeKind::Const => match node.str_at(1) {
            Some(name) => builder::reference(name),
            None => fallback(node),
        },
        NodeKind::SelfKw => builder::self_ref(),
        NodeKind::Nil => builder::none(),
        NodeKind::True => builder::mu_bool(true),
        NodeKind::False => builder::mu_bool(false),
        NodeKind::Int | NodeKind::Float => number(node),
        NodeKind::Str => match node.str_at(0) {
            Some(value) => builder::mu_string(value),
            None => fallback(node),
        },
        NodeKind::Sym => match node.str_at(0) {
            Some(value) => builder::mu_symbol(value),
            None => fallback(node),
        },
        NodeKind::Array => builder::mu_list(
            node.children().iter().map(|c| eval_child(c, ctx)).collect(),
        ),
        NodeKind::Dstr => interpolation(node, ctx),
        NodeKind::Regexp => regexp(node, ctx),

        // ── Parameter forms reached in expression position ─────────────
        NodeKind::Arg | NodeKind::Restarg | NodeKind::Procarg0 | NodeKind::Optarg => {
            patterns::param_pattern(&CstChild::Node(node.clone())).into_ir()
        }

        // ── Unmodeled constructs ───────────────────────────────────────
        NodeKind::Irange
        | NodeKind::Lambda
        | NodeKind::Resbody
        | NodeKind::Unknown(_) => fallback(node),
    }
}

/// Translate any child slot: sub-node, absent slot, or a stray scalar.
pub(crate) fn eval_child(child: &CstChild, ctx: &Context) -> Ir {
    match child {
        CstChild::Node(node) => eval(Some(node), ctx),
        CstChild::Null => builder::none(),
        scalar => builder::other(scalar.to_string()),
    }
}

/// The opaque fallback leaf for an unmodeled subtree.
fn fallback(node: &CstNode) -> Ir {
    builder::other(node.sexp())
}

// ── Name extraction ────────────────────────────────────────────────────

/// The name bound by an assignment-shaped node (`lvasgn`/`ivasgn`).
pub(crate) fn binding_name(node: &CstNode) -> Option<String> {
    node.str_at(0).map(String::from)
}

/// The name of a constant node.
pub(crate) fn const_name(node: &CstNode) -> Option<String> {
    if node.kind() == &NodeKind::Const {
        node.str_at(1).map(String::from)
    } else {
        None
    }
}

// ── Definitions ────────────────────────────────────────────────────────

fn module(node: &CstNode, ctx: &Context) -> Ir {
    let Some(name) = node.node_at(0).and_then(const_name) else {
        return fallback(node);
    };
    let body = eval(node.node_at(1), &ctx.with(Frame::Module));
    Ir::nary(Tag::Object, vec![Value::Str(name), body.into()])
}

fn class(node: &CstNode, ctx: &Context) -> Ir {
    let Some(name) = node.node_at(0).and_then(const_name) else {
        return fallback(node);
    };
    let superclass = match node.node_at(1).and_then(const_name) {
        Some(name) => Value::Str(name),
        None => Value::Null,
    };
    let body = eval(node.node_at(2), &ctx.with(Frame::Class));
    Ir::nary(Tag::Class, vec![Value::Str(name), superclass, body.into()])
}

fn sclass(node: &CstNode, ctx: &Context) -> Ir {
    let inner = ctx.with(Frame::SingletonClass);
    let target = eval(node.node_at(0), &inner);
    let body = eval(node.node_at(1), &inner);
    Ir::nary(Tag::EigenClass, vec![target.into(), body.into()])
}

fn def(node: &CstNode, ctx: &Context) -> Ir {
    let Some(name) = node.str_at(0) else {
        return fallback(node);
    };
    let params = params(node.node_at(1));
    let body = eval(node.node_at(2), ctx);
    match name {
        // Protocol methods get a distinct tag so the analysis engine can
        // special-case the equality and hash-code contracts.
        "==" | "equal?" | "eql?" => builder::primitive_method(Tag::EqualMethod, params, body),
        "hash" => builder::primitive_method(Tag::HashMethod, params, body),
        _ => builder::method(name, params, body),
    }
}

fn defs(node: &CstNode, ctx: &Context) -> Ir {
    let Some(target) = node.node_at(0) else {
        return fallback(node);
    };
    let Some(name) = node.str_at(1) else {
        return fallback(node);
    };
    let method = builder::method(name, params(node.node_at(2)), eval(node.node_at(3), ctx));

    if target.kind() == &NodeKind::SelfKw {
        // Module-level self-methods are the ordinary calling convention
        // there; anywhere else the definition is class-level.
        if ctx.innermost() == Some(Frame::Module) {
            method
        } else {
            Ir::nary(
                Tag::Decorator,
                vec![
                    Value::List(vec![Ir::leaf(Tag::Classy).into()]),
                    method.into(),
                ],
            )
        }
    } else {
        Ir::nary(
            Tag::EigenClass,
            vec![eval(Some(target), ctx).into(), method.into()],
        )
    }
}

fn params(args: Option<&CstNode>) -> Vec<Ir> {
    args.map(|node| {
        node.children()
            .iter()
            .map(|child| patterns::param_pattern(child).into_ir())
            .collect()
    })
    .unwrap_or_default()
}

// ── Statements ─────────────────────────────────────────────────────────

fn begin(node: &CstNode, ctx: &Context) -> Ir {
    // A lone null child is how parsers before ruby 2.6 encoded the empty
    // body.
    if node.children().len() == 1 && node.children()[0].is_null() {
        return builder::none();
    }
    builder::sequence(node.children().iter().map(|c| eval_child(c, ctx)).collect())
}

/// The protected body and (pattern, handler) pairs of a rescue construct.
/// The trailing else slot has no IR counterpart and is dropped.
fn rescue_parts(node: &CstNode, ctx: &Context) -> (Ir, Vec<(Ir, Ir)>) {
    let body = eval(node.node_at(0), ctx);
    let children = node.children();
    let catch_slots = if children.len() >= 2 {
        &children[1..children.len() - 1]
    } else {
        &[][..]
    };
    let catches = catch_slots
        .iter()
        .filter_map(CstChild::as_node)
        .filter(|n| n.kind() == &NodeKind::Resbody)
        .map(|resbody| {
            (
                patterns::rescue_pattern(resbody).into_ir(),
                eval(resbody.node_at(2), ctx),
            )
        })
        .collect();
    (body, catches)
}

fn ensure(node: &CstNode, ctx: &Context) -> Ir {
    let finally = eval(node.node_at(1), ctx);
    match node.node_at(0) {
        Some(inner) if inner.kind() == &NodeKind::Rescue => {
            let (body, catches) = rescue_parts(inner, ctx);
            builder::mu_try(body, catches, finally)
        }
        inner => builder::mu_try(eval(inner, ctx), vec![], finally),
    }
}

fn for_loop(node: &CstNode, ctx: &Context) -> Ir {
    let Some(name) = node.node_at(0).and_then(binding_name) else {
        return fallback(node);
    };
    let generator = Ir::nary(
        Tag::Generator,
        vec![
            Pattern::Variable(name).into_ir().into(),
            eval(node.node_at(1), ctx).into(),
        ],
    );
    Ir::nary(
        Tag::For,
        vec![
            Value::List(vec![generator.into()]),
            eval(node.node_at(2), ctx).into(),
        ],
    )
}

// ── Sends ──────────────────────────────────────────────────────────────

fn send(node: &CstNode, extra_args: Vec<Ir>, ctx: &Context) -> Ir {
    // An absent receiver is an implicit send to self.
    let receiver = match node.child(0) {
        Some(CstChild::Node(recv)) => eval(Some(recv), ctx),
        _ => builder::self_ref(),
    };
    let Some(name) = node.str_at(1) else {
        return fallback(node);
    };
    let mut args: Vec<Ir> = node
        .children()
        .get(2..)
        .unwrap_or(&[])
        .iter()
        .map(|child| eval_child(child, ctx))
        .collect();
    args.extend(extra_args);
    builder::send(receiver, ops::message(name), args)
}

fn block(node: &CstNode, ctx: &Context) -> Ir {
    let Some(callee) = node.node_at(0) else {
        return fallback(node);
    };
    let lambda = builder::lambda(params(node.node_at(1)), eval(node.node_at(2), ctx));
    match callee.kind() {
        // `lambda {}` and `-> {}` arrive as a block over a bare lambda
        // node; the block is the lambda value itself.
        NodeKind::Lambda => lambda,
        NodeKind::Send => send(callee, vec![lambda], ctx),
        _ => fallback(node),
    }
}

fn connective(node: &CstNode, op: mu_ir::Operator, ctx: &Context) -> Ir {
    builder::send(
        eval(node.node_at(0), ctx),
        builder::primitive(op),
        vec![eval(node.node_at(1), ctx)],
    )
}

fn logical_assign(node: &CstNode, op: &str, ctx: &Context) -> Ir {
    node.node_at(0)
        .and_then(|assignee| assign::compound(assignee, op, node.node_at(1), ctx))
        .unwrap_or_else(|| fallback(node))
}

// ── Literals ───────────────────────────────────────────────────────────

fn number(node: &CstNode) -> Ir {
    match node.child(0) {
        Some(CstChild::Int(value)) => builder::mu_int(*value),
        Some(CstChild::Float(value)) => builder::mu_float(*value),
        _ => fallback(node),
    }
}

/// String interpolation: a join-message over the list of literal and
/// embedded parts, in source order.
fn interpolation(node: &CstNode, ctx: &Context) -> Ir {
    let parts = node.children().iter().map(|c| eval_child(c, ctx)).collect();
    builder::simple_send(builder::mu_list(parts), "join", vec![])
}

/// Pattern literals become `Regexp.new` over the literal text; match
/// flags are dropped.
fn regexp(node: &CstNode, ctx: &Context) -> Ir {
    builder::simple_send(
        builder::reference("Regexp"),
        "new",
        vec![eval(node.node_at(0), ctx)],
    )
}
