use fql_syntax::ast::operator::CompareOp;
use fql_syntax::schema::FieldKind;
use model::core::value::Value;
use model::records::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::warn;

/// A field access resolved against a schema: looked up once at compile or
/// translate time, reused for every record tested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub name: String,
    /// Positional index into records laid out in schema order. `None` when
    /// the compile-time schema did not declare the field.
    pub index: Option<usize>,
    pub kind: FieldKind,
}

/// One node of a compiled predicate. The tree stays open for inspection so
/// a storage layer can walk it and push filtering down instead of
/// evaluating in-process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    True,
    Compare {
        binding: FieldBinding,
        op: CompareOp,
        value: Value,
    },
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl Node {
    /// Evaluate against a record with short-circuit semantics: the right
    /// operand is skipped once the left operand decides the result.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Node::True => true,
            Node::Compare { binding, op, value } => compare(binding, *op, value, record),
            Node::And(left, right) => left.matches(record) && right.matches(record),
            Node::Or(left, right) => left.matches(record) || right.matches(record),
        }
    }
}

/// A compiled, structurally inspectable boolean test over records of a
/// named schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    schema_name: String,
    root: Node,
}

impl Predicate {
    pub fn new(schema_name: &str, root: Node) -> Self {
        Predicate {
            schema_name: schema_name.to_string(),
            root,
        }
    }

    /// The match-everything predicate, used for empty filters.
    pub fn always(schema_name: &str) -> Self {
        Predicate::new(schema_name, Node::True)
    }

    /// Name of the schema this predicate is bound to.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.root.matches(record)
    }
}

fn compare(binding: &FieldBinding, op: CompareOp, value: &Value, record: &Record) -> bool {
    let Some(actual) = field_value(binding, record) else {
        // Missing or null field: the comparison is false, never an error.
        return false;
    };

    let Some(ordering) = actual.compare(value) else {
        warn!(
            field = %binding.name,
            "incomparable value kinds in filter comparison"
        );
        return false;
    };

    matches!(
        (op, ordering),
        (CompareOp::Eq, Ordering::Equal)
            | (CompareOp::Ne, Ordering::Less | Ordering::Greater)
            | (CompareOp::Lt, Ordering::Less)
            | (CompareOp::Gt, Ordering::Greater)
    )
}

/// Positional access first; falls back to a name lookup when the record is
/// laid out differently than the binding's schema.
fn field_value<'a>(binding: &FieldBinding, record: &'a Record) -> Option<&'a Value> {
    if let Some(index) = binding.index {
        if let Some(field) = record.field_values.get(index) {
            if field.name == binding.name {
                return field.value.as_ref();
            }
        }
    }
    record.get(&binding.name).and_then(|f| f.value.as_ref())
}
