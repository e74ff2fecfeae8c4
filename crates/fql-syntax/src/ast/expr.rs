use crate::ast::{ident::Identifier, literal::Literal, operator::CompareOp, span::Span};

/// Parsed filter expression, bound to the logical schema it was parsed
/// against. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Comparison {
        field: Identifier,
        op: CompareOp,
        literal: Literal,
        span: Span,
    },
    And {
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },
    Or {
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },
}
