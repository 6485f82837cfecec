//! The closed operator-message table.
//!
//! Every message position in the produced IR is rendered through
//! [`message`], so a name either belongs to the closed primitive set or it
//! is a plain named reference — there is no third case.

use mu_ir::{builder, Ir, Operator};

/// The primitive operation behind a Ruby message name, if any.
pub(crate) fn operator_for(message: &str) -> Option<Operator> {
    match message {
        "==" => Some(Operator::Equal),
        "!=" => Some(Operator::NotEqual),
        "!" => Some(Operator::Negation),
        "&&" => Some(Operator::And),
        "||" => Some(Operator::Or),
        "hash" => Some(Operator::Hash),
        ">=" => Some(Operator::GreaterOrEqualThan),
        ">" => Some(Operator::GreaterThan),
        "<=" => Some(Operator::LessOrEqualThan),
        "<" => Some(Operator::LessThan),
        "+" => Some(Operator::Plus),
        "-" => Some(Operator::Minus),
        "*" => Some(Operator::Multiply),
        "/" => Some(Operator::Divide),
        "length" | "size" => Some(Operator::Size),
        _ => None,
    }
}

/// Render a message name as IR: `Primitive` for the closed operator set,
/// `Reference` for everything else.
pub(crate) fn message(name: &str) -> Ir {
    match operator_for(name) {
        Some(op) => builder::primitive(op),
        None => builder::reference(name),
    }
}
