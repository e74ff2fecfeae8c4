use crate::error::TranslateError;
use crate::predicate::{FieldBinding, Node, Predicate};
use fql_syntax::schema::Schema;
use tracing::debug;

/// Rewrite `predicate` so every field reference targets `physical` instead
/// of the logical schema it was compiled against. Operators and literals
/// are untouched and the tree shape is preserved, so the result has
/// identical semantics over same-valued records.
///
/// Fails with [`TranslateError::FieldMapping`] when a referenced field has
/// no same-named physical counterpart; no partially rewritten tree is ever
/// returned.
pub fn translate(predicate: &Predicate, physical: &Schema) -> Result<Predicate, TranslateError> {
    debug!(
        from = %predicate.schema_name(),
        to = %physical.name,
        "translating predicate"
    );
    let root = rebind(predicate.root(), physical)?;
    Ok(Predicate::new(&physical.name, root))
}

fn rebind(node: &Node, physical: &Schema) -> Result<Node, TranslateError> {
    match node {
        Node::True => Ok(Node::True),
        Node::Compare { binding, op, value } => {
            let index = physical.field_index(&binding.name).ok_or_else(|| {
                TranslateError::FieldMapping {
                    field: binding.name.clone(),
                    schema: physical.name.clone(),
                }
            })?;
            Ok(Node::Compare {
                binding: FieldBinding {
                    name: binding.name.clone(),
                    index: Some(index),
                    kind: physical.fields()[index].kind,
                },
                op: *op,
                value: value.clone(),
            })
        }
        Node::And(left, right) => Ok(Node::And(
            Box::new(rebind(left, physical)?),
            Box::new(rebind(right, physical)?),
        )),
        Node::Or(left, right) => Ok(Node::Or(
            Box::new(rebind(left, physical)?),
            Box::new(rebind(right, physical)?),
        )),
    }
}
