pub mod db;
pub mod parser;

pub use parser::model::ParseResult;
pub use parser::parse;
