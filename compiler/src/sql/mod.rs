pub mod expr;
pub mod placeholders;
pub mod sanitize;
pub mod tree;
