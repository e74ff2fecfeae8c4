use fql_syntax::errors::FilterParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// A logical field has no same-named physical counterpart. Schema
    /// drift, not bad user input: the paired schemas are expected to share
    /// field names by convention.
    #[error("no field '{field}' on schema '{schema}' to rebind the filter against")]
    FieldMapping { field: String, schema: String },
}

/// Facade-level error carrying the underlying cause, surfaced to API
/// callers as a client error.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Couldn't parse the filter: {0}")]
    Parse(#[from] FilterParseError),

    #[error("Couldn't parse the filter: {0}")]
    Translate(#[from] TranslateError),
}
