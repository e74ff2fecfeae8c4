pub mod ast;
pub mod builder;
pub mod errors;
pub mod normalize;
pub mod parser;
pub mod schema;

pub use builder::parse;
pub use errors::FilterParseError;
pub use normalize::normalize;
pub use schema::{Field, FieldKind, Schema};
