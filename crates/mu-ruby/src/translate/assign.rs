//! Compound-assignment desugaring.
//!
//! `target OP= value` has no IR form of its own: it is rewritten into
//! exactly the tree `target = target OP value` would translate to. The
//! logical forms `||=` and `&&=` reuse the rule with OP fixed.

use mu_ir::{builder, Ir};

use crate::context::Context;
use crate::cst::{CstChild, CstNode, NodeKind};

use super::{binding_name, eval, eval_child, ops};

/// Desugar `assignee OP= value`. `None` when the target is unreadable, in
/// which case the caller degrades to the fallback leaf.
pub(crate) fn compound(
    assignee: &CstNode,
    op: &str,
    value: Option<&CstNode>,
    ctx: &Context,
) -> Option<Ir> {
    if assignee.kind() == &NodeKind::Send {
        property(assignee, op, value, ctx)
    } else {
        variable(assignee, op, value, ctx)
    }
}

/// `name OP= value` → `Assignment(name, Send(Reference(name), OP, [value]))`.
fn variable(assignee: &CstNode, op: &str, value: Option<&CstNode>, ctx: &Context) -> Option<Ir> {
    let name = binding_name(assignee)?;
    let new_value = builder::send(
        builder::reference(name.clone()),
        ops::message(op),
        vec![eval(value, ctx)],
    );
    Some(builder::assignment(name, new_value))
}

/// `recv.accessor(args) OP= value` → a writer-style send: the old value is
/// recomputed by re-issuing the accessor read, combined with `value` via
/// OP, and passed after the original arguments to `accessor=`.
fn property(assignee: &CstNode, op: &str, value: Option<&CstNode>, ctx: &Context) -> Option<Ir> {
    let receiver = match assignee.child(0) {
        Some(CstChild::Node(node)) => eval(Some(node), ctx),
        _ => builder::self_ref(),
    };
    let accessor = assignee.str_at(1)?;
    let args: Vec<Ir> = assignee
        .children()
        .get(2..)
        .unwrap_or(&[])
        .iter()
        .map(|child| eval_child(child, ctx))
        .collect();

    let old_value = builder::send(receiver.clone(), ops::message(accessor), args.clone());
    let new_value = builder::send(old_value, ops::message(op), vec![eval(value, ctx)]);

    let mut writer_args = args;
    writer_args.push(new_value);
    Some(builder::send(
        receiver,
        ops::message(&format!("{accessor}=")),
        writer_args,
    ))
}
