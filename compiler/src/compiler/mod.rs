mod compiler;
mod conditions;
mod expr;
mod joins;
mod rendering;
mod result_columns;
mod scope;
mod sorting;
mod subqueries;
mod validation;

pub mod constants;

pub use compiler::Compiler;
pub use validation::validate;
