pub mod expr;
pub mod ident;
pub mod literal;
pub mod operator;
pub mod span;
