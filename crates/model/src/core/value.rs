use chrono::NaiveDateTime;
use fql_syntax::ast::literal::Literal;
use fql_syntax::schema::FieldKind;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Null,
}

impl Value {
    /// Ordered comparison between values of compatible kinds. Int and Float
    /// compare numerically across kinds; disjoint kinds (and `Null`) return
    /// `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Value::Int(_) => Some(FieldKind::Integer),
            Value::Float(_) => Some(FieldKind::Decimal),
            Value::String(_) => Some(FieldKind::String),
            Value::Boolean(_) => Some(FieldKind::Boolean),
            Value::DateTime(_) => Some(FieldKind::DateTime),
            Value::Null => None,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Int(i) => Value::Int(*i),
            Literal::Float(v) => Value::Float(*v),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::DateTime(dt) => Value::DateTime(*dt),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "'{v}'"),
            Value::Null => write!(f, "NULL"),
        }
    }
}
