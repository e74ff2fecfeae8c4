use crate::schema::FieldKind;
use chrono::NaiveDateTime;
use std::fmt;

/// Literal values, already coerced to the declared kind of the field they
/// are compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

impl Literal {
    pub fn kind(&self) -> FieldKind {
        match self {
            Literal::String(_) => FieldKind::String,
            Literal::Int(_) => FieldKind::Integer,
            Literal::Float(_) => FieldKind::Decimal,
            Literal::Boolean(_) => FieldKind::Boolean,
            Literal::DateTime(_) => FieldKind::DateTime,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::DateTime(dt) => write!(f, "datetime'{}'", dt),
        }
    }
}
