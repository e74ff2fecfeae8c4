use crate::{parser::Rule, schema::FieldKind};
use pest::error::Error as PestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterParseError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Unknown field '{name}' in schema '{schema}' at line {line}, column {column}")]
    UnknownField {
        name: String,
        schema: String,
        line: usize,
        column: usize,
    },

    #[error("Field '{field}' expects a {expected} literal, got {literal}")]
    LiteralType {
        field: String,
        expected: FieldKind,
        literal: String,
    },
}

impl FilterParseError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        use pest::error::LineColLocation;

        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };

        FilterParseError::Syntax {
            message: format!("{}", err.variant),
            line,
            column,
        }
    }
}
