use crate::predicate::{FieldBinding, Node, Predicate};
use fql_syntax::ast::expr::FilterExpr;
use fql_syntax::schema::Schema;
use model::core::value::Value;

/// Lower a parsed filter AST into an executable predicate over `schema`.
///
/// Infallible: field resolution and literal coercion already happened at
/// parse time, so there is no failure surface left here. Pure transform,
/// the AST is not consumed.
pub fn compile(expr: &FilterExpr, schema: &Schema) -> Predicate {
    Predicate::new(&schema.name, lower(expr, schema))
}

fn lower(expr: &FilterExpr, schema: &Schema) -> Node {
    match expr {
        FilterExpr::Comparison {
            field, op, literal, ..
        } => {
            let (index, kind) = match schema.field_index(&field.name) {
                Some(i) => (Some(i), schema.fields()[i].kind),
                // Parsed against a different schema instance; the literal
                // kind still describes the comparison.
                None => (None, literal.kind()),
            };
            Node::Compare {
                binding: FieldBinding {
                    name: field.name.clone(),
                    index,
                    kind,
                },
                op: *op,
                value: Value::from(literal),
            }
        }
        FilterExpr::And { left, right } => Node::And(
            Box::new(lower(left, schema)),
            Box::new(lower(right, schema)),
        ),
        FilterExpr::Or { left, right } => Node::Or(
            Box::new(lower(left, schema)),
            Box::new(lower(right, schema)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fql_syntax::ast::operator::CompareOp;
    use fql_syntax::builder;
    use fql_syntax::schema::FieldKind;

    fn schema() -> Schema {
        Schema::new("RunDto")
            .with_field("date", FieldKind::DateTime)
            .with_field("distance", FieldKind::Integer)
    }

    #[test]
    fn test_comparison_is_bound_by_index_and_kind() {
        let schema = schema();
        let ast = builder::parse("distance gt 20", &schema).expect("parse");
        let predicate = compile(&ast, &schema);

        assert_eq!(predicate.schema_name(), "RunDto");
        match predicate.root() {
            Node::Compare { binding, op, value } => {
                assert_eq!(binding.name, "distance");
                assert_eq!(binding.index, Some(1));
                assert_eq!(binding.kind, FieldKind::Integer);
                assert_eq!(*op, CompareOp::Gt);
                assert_eq!(*value, Value::Int(20));
            }
            other => panic!("Expected comparison node, got {:?}", other),
        }
    }

    #[test]
    fn test_tree_shape_mirrors_the_ast() {
        let schema = schema();
        let ast = builder::parse(
            "(date eq datetime'2016-05-01') and ((distance gt 20) or (distance lt 10))",
            &schema,
        )
        .expect("parse");
        let predicate = compile(&ast, &schema);

        match predicate.root() {
            Node::And(left, right) => {
                assert!(matches!(**left, Node::Compare { .. }));
                assert!(matches!(**right, Node::Or(_, _)));
            }
            other => panic!("Expected and node at the root, got {:?}", other),
        }
    }
}
