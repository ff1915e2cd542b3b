mod compiler;
mod errors;
mod options;
mod sql;
mod tests;

pub use compiler::{validate, Compiler};
pub use errors::error::Error;
pub use json2sql_descriptor as descriptor;
pub use json2sql_descriptor::ast::QueryDescriptor;
pub use options::Options;
pub use sql::placeholders::{BindValue, Statement};
