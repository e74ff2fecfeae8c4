pub mod compile;
pub mod error;
pub mod facade;
pub mod predicate;
pub mod translate;

pub use compile::compile;
pub use error::{FilterError, TranslateError};
pub use facade::{parse_and_translate, parse_filter};
pub use predicate::{FieldBinding, Node, Predicate};
pub use translate::translate;
